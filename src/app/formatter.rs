use crate::app::models::{CollectConfig, FileContent, ScanResult};
use crate::app::reader::{read_content, ReadOptions};
use encoding_rs::Encoding;
use std::io::{self, Write};
use std::path::PathBuf;

pub const SEPARATOR_WIDTH: usize = 80;

/// Streams the collected document. Files are read one at a time while writing.
pub struct OutputGenerator {
    root: PathBuf,
    read_options: ReadOptions,
    encoding: &'static Encoding,
    add_separators: bool,
    separator: String,
}

impl OutputGenerator {
    pub fn new(config: &CollectConfig) -> Self {
        Self {
            root: config.target_dir.clone(),
            read_options: ReadOptions::from_config(config),
            encoding: config.output_encoding,
            add_separators: config.add_separators,
            separator: "=".repeat(SEPARATOR_WIDTH),
        }
    }

    pub fn write<W: Write>(&self, scan: &ScanResult, out: &mut W) -> io::Result<()> {
        let sep = &self.separator;

        self.emit(
            out,
            &format!(
                "Directory contents: {}\nTotal files collected: {}\nFiles skipped: {}\n\n{}\n\n",
                self.root.display(),
                scan.collected.len(),
                scan.skipped.len(),
                sep
            ),
        )?;

        for entry in &scan.collected {
            if self.add_separators {
                self.emit(out, &format!("\n{}\n", sep))?;
            }

            self.emit(
                out,
                &format!(
                    "File: {}\nFull path: {}\n{}\n\n",
                    entry.relative_path,
                    entry.path.display(),
                    sep
                ),
            )?;

            match read_content(&entry.path, &self.read_options) {
                FileContent::Text(text) => self.emit(out, &text)?,
                FileContent::Failed(failure) => {
                    log::debug!("Placeholder for {}: {}", entry.relative_path, failure);
                    self.emit(out, &failure.to_string())?
                }
            }

            if self.add_separators {
                self.emit(out, &format!("\n\n{}\n", sep))?;
            } else {
                self.emit(out, "\n\n")?;
            }
        }

        if !scan.skipped.is_empty() {
            self.emit(out, &format!("\n\n{}\nSKIPPED FILES:\n{}\n\n", sep, sep))?;
            for entry in &scan.skipped {
                self.emit(out, &format!("  - {}\n", entry.relative_path))?;
            }
        }

        Ok(())
    }

    fn emit<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        // Unmappable characters become numeric character references
        let (bytes, _, _) = self.encoding.encode(text);
        out.write_all(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::FileEntry;
    use crate::app::scanner::tests::test_config;
    use crate::app::scanner::Scanner;
    use std::fs;
    use tempfile::tempdir;

    fn render(config: &CollectConfig) -> String {
        let scan = Scanner::new(config).scan();
        let mut buf = Vec::new();
        OutputGenerator::new(config).write(&scan, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_collected_and_skipped_sections() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.txt"), "hello").unwrap();
        fs::write(root.join("b.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("c.txt"), "world").unwrap();

        let output = render(&test_config(root));
        let sep = "=".repeat(80);
        let expected = format!(
            "Directory contents: {root}\n\
             Total files collected: 2\n\
             Files skipped: 1\n\
             \n{sep}\n\n\
             \n{sep}\n\
             File: a.txt\n\
             Full path: {a}\n\
             {sep}\n\n\
             hello\n\n{sep}\n\
             \n{sep}\n\
             File: sub/c.txt\n\
             Full path: {c}\n\
             {sep}\n\n\
             world\n\n{sep}\n\
             \n\n{sep}\n\
             SKIPPED FILES:\n\
             {sep}\n\n  - b.png\n",
            root = root.display(),
            sep = sep,
            a = root.join("a.txt").display(),
            c = root.join("sub").join("c.txt").display(),
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn no_skipped_section_when_nothing_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();

        let output = render(&test_config(dir.path()));
        assert!(!output.contains("SKIPPED FILES:"));
        assert!(output.contains("Files skipped: 0\n"));
    }

    #[test]
    fn separators_can_be_turned_off() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();

        let mut config = test_config(dir.path());
        config.add_separators = false;
        let output = render(&config);
        let sep = "=".repeat(80);

        assert!(output.contains(&format!("{sep}\n\nFile: a.txt\n", sep = sep)));
        assert!(output.ends_with(&format!("{sep}\n\nhello\n\n", sep = sep)));
    }

    #[test]
    fn oversized_file_shows_placeholder() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("big.txt"), "y".repeat(5000)).unwrap();

        let output = render(&test_config(dir.path()));
        assert!(output.contains("[File too large: 5000 bytes, skipped]"));
        assert!(!output.contains(&"y".repeat(100)));
        assert!(output.contains("Total files collected: 1\n"));
    }

    #[test]
    fn read_failures_do_not_stop_the_run() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b.txt"), "still here").unwrap();

        let mut scan = Scanner::new(&test_config(root)).scan();
        scan.collected.insert(
            0,
            FileEntry {
                path: root.join("a-vanished.txt"),
                relative_path: "a-vanished.txt".to_string(),
            },
        );

        let mut buf = Vec::new();
        OutputGenerator::new(&test_config(root))
            .write(&scan, &mut buf)
            .unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("[Error reading file: "));
        assert!(output.contains("still here"));
    }

    #[test]
    fn output_is_encoded_with_configured_encoding() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "café").unwrap();

        let mut config = test_config(dir.path());
        config.output_encoding = encoding_rs::WINDOWS_1252;
        let scan = Scanner::new(&config).scan();
        let mut buf = Vec::new();
        OutputGenerator::new(&config).write(&scan, &mut buf).unwrap();

        assert!(buf.windows(4).any(|w| w == [b'c', b'a', b'f', 0xe9]));
        assert!(String::from_utf8(buf).is_err());
    }
}
