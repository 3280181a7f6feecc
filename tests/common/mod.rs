use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PORONDAM_READING: &str = "\
ඔබ දෙදෙනාගේ පොරොන්දම් විස්තරය.

**නැකැත් පොරොන්දම:** ගැලපේ
නැකැත් දෙක අතර හොඳ සම්බන්ධයක් ඇත.

**ගණ පොරොන්දම:** (නොගැලපේ)
ගණ දෙක වෙනස් වේ.

**සාරාංශය:**
මුළු ලකුණු: 14/20
";

pub const LEGACY_READING: &str = "\
### හැඳින්වීම
ඔබගේ ලග්නය **සිංහ** වේ.

### වෘත්තිය
හොඳ කාලයකි.
";

pub const CHART_SET: &str = r#"{
  "d1_chart": {"lagna": "Leo", "planets": {"Sun": "Leo", "Moon": "Aries", "Rahu": "Leo"}},
  "d9_chart": {"lagna": "Aries", "planets": {"Sun": "Cancer"}},
  "astro_details": {
    "lagna": "Leo",
    "navamsa_lagna": "Aries",
    "nakshatra": {"name": "Ashwini"},
    "dasha_info": {"current_mahadasha": "Venus"}
  }
}"#;

pub const PARTNER_CHARTS: &str = r#"{
  "person1": {
    "d1": {"lagna": "Leo", "planets": {"Sun": "Leo"}},
    "d9": {"lagna": "Aries", "planets": {}},
    "details": {"lagna": "Leo", "nakshatra": {"name": "Magha"}}
  },
  "person2": {
    "d1": {"lagna": "Virgo", "planets": {"Moon": "Virgo"}},
    "d9": {"lagna": "Pisces", "planets": {}},
    "details": {"lagna": "Virgo", "nakshatra": {"name": "Hasta"}}
  }
}"#;

pub struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn kendara(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("kendara");
        cmd.current_dir(self.tmp.path());
        cmd
    }

    pub fn chart(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("kendara-chart");
        cmd.current_dir(self.tmp.path());
        cmd
    }
}

pub fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("read json output");
    serde_json::from_str(&content).expect("valid json output")
}
