//! Preparing sheets for a list of cache codes.
//!
//! [`Caches`] wires three collaborators together: a [`PageSource`] fetching
//! the raw page of a cache, a [`PageParser`] turning it into stages, and a
//! [`SheetWriter`] consuming the laid-out rows.

use crate::cache::{Cache, read_page};
use crate::error::{CasprError, Result};
use crate::storage::Format;
use caspr_engine::engine::{Diagnostic, LayoutOptions, Row, Rows, Stage, layout_with};
use std::io::{self, Write};
use std::path::PathBuf;

/// Where cache pages come from.
pub trait PageSource {
    fn fetch(&mut self, code: &str) -> Result<String>;
}

/// Turns a page into the ordered stages of one cache.
pub trait PageParser {
    fn parse(&self, page: &str) -> Result<Vec<Stage>>;
}

/// Receives the rows of one location.
pub trait SheetWriter {
    fn write(&mut self, code: &str, rows: &mut Rows<'_>) -> Result<()>;
}

pub struct Caches<S, P, W> {
    source: S,
    parser: P,
    writer: W,
    options: LayoutOptions,
}

impl<S: PageSource, P: PageParser, W: SheetWriter> Caches<S, P, W> {
    pub fn new(source: S, parser: P, writer: W, options: LayoutOptions) -> Self {
        Caches {
            source,
            parser,
            writer,
            options,
        }
    }

    /// Fetch, parse, lay out and write every code in order.
    ///
    /// Stops at the first failing code. Returns the diagnostics of all
    /// locations prepared.
    pub fn prepare<I, C>(&mut self, codes: I) -> Result<Vec<Diagnostic>>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut diagnostics = Vec::new();
        for code in codes {
            let code = code.as_ref();
            tracing::info!(code, "preparing cache");

            let page = self.source.fetch(code)?;
            let stages = self.parser.parse(&page)?;
            tracing::debug!(code, stages = stages.len(), "parsed stages");

            let mut rows = layout_with(&stages, self.options);
            self.writer.write(code, &mut rows)?;
            let unwritten = rows.by_ref().count();
            if unwritten > 0 {
                tracing::warn!(code, unwritten, "writer left rows unconsumed");
            }
            diagnostics.extend(rows.diagnostics().iter().cloned());
        }
        Ok(diagnostics)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Reads `<dir>/<CODE>.toml`.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySource { dir: dir.into() }
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.toml"))
    }
}

impl PageSource for DirectorySource {
    fn fetch(&mut self, code: &str) -> Result<String> {
        let path = self.path_for(code);
        tracing::debug!(path = %path.display(), "reading cache file");
        read_page(&path).map_err(|err| match err {
            CasprError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                CasprError::PageNotFound(code.to_string())
            }
            other => other,
        })
    }
}

/// Decodes TOML cache files.
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheFileParser;

impl PageParser for CacheFileParser {
    fn parse(&self, page: &str) -> Result<Vec<Stage>> {
        Ok(Cache::from_toml(page)?.stages())
    }
}

/// Writes `<dir>/<CODE>.<ext>` per location.
#[derive(Clone, Debug)]
pub struct FileSheetWriter {
    dir: PathBuf,
    format: Format,
    written: Vec<PathBuf>,
}

impl FileSheetWriter {
    pub fn new(dir: impl Into<PathBuf>, format: Format) -> Self {
        FileSheetWriter {
            dir: dir.into(),
            format,
            written: Vec::new(),
        }
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn target(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", code, self.format.extension()))
    }
}

impl SheetWriter for FileSheetWriter {
    fn write(&mut self, code: &str, rows: &mut Rows<'_>) -> Result<()> {
        let rows: Vec<Row> = rows.collect();
        let content = self.format.render(&rows)?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.target(code);
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "sheet written");
        self.written.push(path);
        Ok(())
    }
}

/// Writes every sheet to one stream, e.g. stdout.
pub struct StreamSheetWriter<W: Write> {
    out: W,
    format: Format,
}

impl<W: Write> StreamSheetWriter<W> {
    pub fn new(out: W, format: Format) -> Self {
        StreamSheetWriter { out, format }
    }
}

impl<W: Write> SheetWriter for StreamSheetWriter<W> {
    fn write(&mut self, code: &str, rows: &mut Rows<'_>) -> Result<()> {
        let rows: Vec<Row> = rows.collect();
        let content = self.format.render(&rows)?;
        tracing::debug!(code, rows = rows.len(), "writing sheet to stream");
        self.out.write_all(content.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeSite {
        calls: Vec<String>,
    }

    impl PageSource for FakeSite {
        fn fetch(&mut self, code: &str) -> Result<String> {
            self.calls.push(code.to_string());
            Ok(format!("page of {code}"))
        }
    }

    struct FakeParser;

    impl PageParser for FakeParser {
        fn parse(&self, page: &str) -> Result<Vec<Stage>> {
            Ok(vec![Stage::new(page, "???", "A = benches\nN 47° 0A.BC")])
        }
    }

    #[derive(Default)]
    struct Recorder {
        sheets: Vec<(String, Vec<Row>)>,
    }

    impl SheetWriter for Recorder {
        fn write(&mut self, code: &str, rows: &mut Rows<'_>) -> Result<()> {
            self.sheets.push((code.to_string(), rows.collect()));
            Ok(())
        }
    }

    #[test]
    fn test_prepares_a_cache() {
        let mut caches = Caches::new(
            FakeSite::default(),
            FakeParser,
            Recorder::default(),
            LayoutOptions::default(),
        );
        let diagnostics = caches.prepare(["ABCDEF"]).unwrap();
        assert_eq!(caches.source.calls, ["ABCDEF"]);

        let recorder = caches.into_writer();
        assert_eq!(recorder.sheets.len(), 1);
        let (code, rows) = &recorder.sheets[0];
        assert_eq!(code, "ABCDEF");
        assert_eq!(rows[0].cells[0], "page of ABCDEF");
        assert_eq!(rows.len(), 3);

        assert_eq!(
            diagnostics,
            [Diagnostic::UnresolvedVariables {
                stage: "page of ABCDEF".to_string(),
                letters: vec!['B', 'C'],
            }]
        );
    }

    #[test]
    fn test_each_location_starts_fresh() {
        let mut caches = Caches::new(
            FakeSite::default(),
            FakeParser,
            Recorder::default(),
            LayoutOptions::default(),
        );
        caches.prepare(["ONE", "TWO"]).unwrap();
        let recorder = caches.into_writer();
        let (_, first) = &recorder.sheets[0];
        let (_, second) = &recorder.sheets[1];
        assert_eq!(first.len(), second.len());
        assert_eq!(first[2], second[2]);
        assert_eq!(first[2].row, 3);
    }

    #[test]
    fn test_missing_file_is_page_not_found() {
        let mut source = DirectorySource::new(std::env::temp_dir().join("caspr-no-such-dir"));
        assert!(matches!(
            source.fetch("GCNOPE"),
            Err(CasprError::PageNotFound(code)) if code == "GCNOPE"
        ));
    }

    #[test]
    fn test_cache_file_parser() {
        let stages = CacheFileParser
            .parse("name = \"Lake\"\n[[waypoints]]\nname = \"Stage 1\"\ndescription = \"A = swans\"\n")
            .unwrap();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1].tasks.len(), 1);
        assert!(matches!(
            CacheFileParser.parse("name = "),
            Err(CasprError::Parse { .. })
        ));
    }

    #[test]
    fn test_stream_writer() {
        let mut buf: Vec<u8> = Vec::new();
        let mut caches = Caches::new(
            FakeSite::default(),
            FakeParser,
            StreamSheetWriter::new(&mut buf, Format::Grd),
            LayoutOptions::default(),
        );
        caches.prepare(["GC1"]).unwrap();
        drop(caches);
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("# Caspr Sheet\nA1: \"page of GC1\"\n"));
        assert!(out.contains("A3: \"benches\"\nB3: \"A\"\n"));
    }

    #[test]
    fn test_file_writer_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "caspr_caches_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ));
        struct Cleanup(PathBuf);
        impl Drop for Cleanup {
            fn drop(&mut self) {
                let _ = std::fs::remove_dir_all(&self.0);
            }
        }
        let _cleanup = Cleanup(dir.clone());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("GC1.toml"),
            "name = \"Lake\"\ndescription = \"A = swans\\nN 47° 0A.123\"\n",
        )
        .unwrap();

        let mut caches = Caches::new(
            DirectorySource::new(&dir),
            CacheFileParser,
            FileSheetWriter::new(dir.join("out"), Format::Csv),
            LayoutOptions::default(),
        );
        let diagnostics = caches.prepare(["GC1"]).unwrap();
        assert!(diagnostics.is_empty());

        let writer = caches.into_writer();
        assert_eq!(writer.written(), [dir.join("out").join("GC1.csv")]);
        let csv = std::fs::read_to_string(&writer.written()[0]).unwrap();
        assert!(csv.starts_with("Lake,\n\"A = swans\nN 47° 0A.123\",\"=\"\"N\"\"&"));
        assert!(csv.ends_with("\nswans,A\n"));
    }
}
