#![allow(dead_code)]

use add_version::error::Result;
use add_version::runner::CommandRunner;
use add_version::Version;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CHANGES_PATH: &str = "lucene/CHANGES.txt";
pub const VERSION_JAVA_PATH: &str = "lucene/core/src/java/org/apache/lucene/util/Version.java";
pub const PROPERTIES_PATH: &str = "build-options.properties";

/// Temporary source checkout with the three release artifacts
pub struct Checkout {
    pub dir: TempDir,
}

impl Checkout {
    /// `constants` in ascending order; every constant but the last is deprecated
    pub fn new(current: Version, changelog_headers: &[Version], constants: &[Version]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let checkout = Checkout { dir };
        checkout.write(
            PROPERTIES_PATH,
            &format!(
                "# Build options\nversion.base={}\nversion.suffix=SNAPSHOT\nversion.release=${{version.base}}-${{version.suffix}}\n",
                current
            ),
        );
        checkout.write(CHANGES_PATH, &changes_txt(changelog_headers));
        checkout.write(VERSION_JAVA_PATH, &version_java(constants));
        checkout
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read artifact")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, content).expect("write artifact");
    }

    pub fn snapshot(&self) -> Vec<String> {
        [CHANGES_PATH, VERSION_JAVA_PATH, PROPERTIES_PATH]
            .iter()
            .map(|p| self.read(p))
            .collect()
    }
}

/// Changelog with one section per header, newest first
pub fn changes_txt(headers: &[Version]) -> String {
    let mut text = String::from("Lucene Change Log\n\nFor more information on past and future Lucene versions, please see:\nhttp://s.apache.org/luceneversions\n\n");
    for header in headers {
        text.push_str(&format!(
            "======================= Lucene {} =======================\n\nBug Fixes\n---------------------\n* LUCENE-{}{}{}: fixed something\n\n",
            header, header.major, header.minor, header.bugfix
        ));
    }
    text
}

/// Version constants file in ascending order
///
/// Every constant but the last is deprecated. The oldest one carries its
/// annotation on the declaration line, as formatted sources do.
pub fn version_java(constants: &[Version]) -> String {
    let mut text = String::from("package org.apache.lucene.util;\n\npublic final class Version {\n");
    for (i, v) in constants.iter().enumerate() {
        let is_last = i + 1 == constants.len();
        text.push_str(&format!(
            "\n  /**\n   * Match settings and bugs in Lucene's {} release.\n",
            v
        ));
        let annotation = if is_last {
            text.push_str("   * <p>Use this to get the latest &amp; greatest settings, bug fixes, etc, for Lucene.\n   */\n");
            ""
        } else if i == 0 {
            text.push_str("   *\n   * @deprecated Use latest\n   */\n");
            "@Deprecated "
        } else {
            text.push_str("   *\n   * @deprecated Use latest\n   */\n  @Deprecated\n");
            ""
        };
        text.push_str(&format!(
            "  {}public static final Version LUCENE_{}_{}_{} = new Version({}, {}, {});\n",
            annotation, v.major, v.minor, v.bugfix, v.major, v.minor, v.bugfix
        ));
    }
    let latest = constants.last().expect("at least one constant");
    text.push_str(&format!(
        "\n  // To add a new version:\n  //  * Only add above this comment\n\n  /**\n   * WARNING: if you use this setting, and then upgrade to a newer release of Lucene,\n   * sizable changes may happen.\n   */\n  public static final Version LATEST = LUCENE_{}_{}_{};\n\n  /**\n   * Constant for backwards compatibility.\n   *\n   * @deprecated Use {{@link #LATEST}}\n   */\n  @Deprecated public static final Version LUCENE_CURRENT = LATEST;\n}}\n",
        latest.major, latest.minor, latest.bugfix
    ));
    text
}

/// Runner that records commands instead of executing them
pub struct RecordingRunner {
    pub commands: RefCell<Vec<(String, PathBuf)>>,
    fail_with: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        RecordingRunner {
            commands: RefCell::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        RecordingRunner {
            commands: RefCell::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.commands.borrow().len()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, dir: &Path) -> Result<()> {
        self.commands
            .borrow_mut()
            .push((command.to_string(), dir.to_path_buf()));
        match &self.fail_with {
            Some(msg) => Err(add_version::AddVersionError::external_command(msg.clone())),
            None => Ok(()),
        }
    }
}
