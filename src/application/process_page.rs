//! Page processing use case
//!
//! Replaces every registered table tag in a page's markdown with the table
//! its reader renders. For each tag name, in registry order:
//!
//! 1. scan the current text for all occurrences of the tag
//! 2. parse each occurrence's arguments
//! 3. resolve the referenced file against the search directories
//! 4. render it with the registered reader
//! 5. splice every fragment back at its occurrence, re-indented
//!
//! The updated text is then scanned for the next tag name. Any failure
//! aborts the whole page: callers get a fully processed page or an error.

use crate::domain::{
    ArgParser, ParsedCall, ReaderRegistry, SearchPath, Substitutor, TableReader, TagOccurrence,
    TagScanner, Value,
};
use crate::error::{Result, TableReaderError};
use crate::infrastructure::{PathResolver, Project, WorkingDirGuard};
use std::path::Path;

/// Processes pages of one project with one set of readers
pub struct TableProcessor<'a> {
    project: &'a Project,
    registry: &'a ReaderRegistry,
}

impl<'a> TableProcessor<'a> {
    pub fn new(project: &'a Project, registry: &'a ReaderRegistry) -> Self {
        TableProcessor { project, registry }
    }

    /// Process `source`, the markdown of a page living in `page_dir`
    ///
    /// # Errors
    ///
    /// Returns `TagFailed` wrapping the first argument, resolution or reader
    /// error, with the tag name and raw arguments of the failing occurrence.
    pub fn process(&self, source: &str, page_dir: &Path) -> Result<String> {
        let search_path = self.project.search_path(page_dir);
        let base_dir = self.project.base_dir();
        let mut text = source.to_string();

        for (tag, reader) in self.registry.iter() {
            let occurrences = TagScanner::new(tag).scan(&text);
            if occurrences.is_empty() {
                continue;
            }
            log::debug!("{}: {} occurrence(s)", tag, occurrences.len());

            let fragments = occurrences
                .iter()
                .map(|occurrence| {
                    self.render_occurrence(occurrence, reader, &search_path, &base_dir)
                        .map_err(|e| TableReaderError::TagFailed {
                            tag: tag.to_string(),
                            raw_args: occurrence.raw_args.clone(),
                            source: Box::new(e),
                        })
                })
                .collect::<Result<Vec<String>>>()?;

            let mut substitutor = Substitutor::new(&text);
            for (occurrence, fragment) in occurrences.iter().zip(&fragments) {
                substitutor.push(occurrence, fragment)?;
            }
            let updated = substitutor.finish();
            text = updated;
        }

        Ok(text)
    }

    fn render_occurrence(
        &self,
        occurrence: &TagOccurrence,
        reader: &dyn TableReader,
        search_path: &SearchPath,
        base_dir: &Path,
    ) -> Result<String> {
        let call = ArgParser::parse(&occurrence.raw_args)?;
        let call = resolve_path_argument(call, &occurrence.raw_args, search_path, base_dir)?;

        if reader.requires_working_dir() {
            let _guard = WorkingDirGuard::change_to(base_dir)?;
            reader.render(&call)
        } else {
            reader.render(&call)
        }
    }
}

/// Rewrite the call's path argument to the absolute path of the file it names
fn resolve_path_argument(
    call: ParsedCall,
    raw_args: &str,
    search_path: &SearchPath,
    base_dir: &Path,
) -> Result<ParsedCall> {
    match call.path_argument() {
        None => Ok(call),
        Some(Value::String(path)) => {
            let resolved = PathResolver::resolve(path, search_path, base_dir)?;
            Ok(call.with_path(&resolved.to_string_lossy()))
        }
        Some(other) => Err(TableReaderError::ArgSyntax {
            raw: raw_args.to_string(),
            message: format!("file path must be a string, got {}", other.kind()),
        }),
    }
}

/// Process one page's markdown; see [`TableProcessor::process`]
pub fn process_document(
    source: &str,
    page_dir: &Path,
    project: &Project,
    registry: &ReaderRegistry,
) -> Result<String> {
    TableProcessor::new(project, registry).process(source, page_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Config;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Project rooted in a temp dir with `data/` and `page_dir/`
    fn fixture() -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("data")).unwrap();
        fs::create_dir_all(temp.path().join("page_dir")).unwrap();
        let config = Config {
            data_path: "./data".to_string(),
            ..Config::default()
        };
        let project = Project::new(temp.path().to_path_buf(), config);
        (temp, project)
    }

    /// Registry whose `read_csv` echoes the call and records it
    fn echo_registry(calls: Rc<RefCell<Vec<ParsedCall>>>) -> ReaderRegistry {
        let mut registry = ReaderRegistry::new();
        registry.register("read_csv", move |call: &ParsedCall| -> Result<String> {
            calls.borrow_mut().push(call.clone());
            Ok(format!("TABLE({})", call.path().unwrap_or("-")))
        });
        registry
    }

    #[test]
    fn test_resolves_from_page_directory() {
        let (temp, project) = fixture();
        fs::write(temp.path().join("page_dir/data.csv"), "a\n1\n").unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = echo_registry(calls.clone());

        let page_dir = temp.path().join("page_dir");
        let out = process_document("{{ read_csv(data.csv) }}", &page_dir, &project, &registry)
            .unwrap();

        let expected = page_dir.join("data.csv");
        assert_eq!(out, format!("TABLE({})", expected.display()));
        assert_eq!(calls.borrow()[0].path(), expected.to_str());
    }

    #[test]
    fn test_missing_file_names_all_directories() {
        let (temp, project) = fixture();
        let registry = echo_registry(Rc::new(RefCell::new(Vec::new())));
        let page_dir = temp.path().join("page_dir");

        let err = process_document(
            "    {{ read_csv(missing.csv) }}",
            &page_dir,
            &project,
            &registry,
        )
        .unwrap_err();

        match &err {
            TableReaderError::TagFailed { tag, raw_args, source } => {
                assert_eq!(tag, "read_csv");
                assert_eq!(raw_args, "missing.csv");
                match source.as_ref() {
                    TableReaderError::FileNotFound { path, searched } => {
                        assert_eq!(path, "missing.csv");
                        assert_eq!(
                            searched,
                            &vec!["./data".to_string(), page_dir.display().to_string()]
                        );
                    }
                    other => panic!("Expected FileNotFound, got {:?}", other),
                }
            }
            other => panic!("Expected TagFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_search_page_directory_disabled() {
        let (temp, mut project) = fixture();
        project.config_mut().search_page_directory = false;
        fs::write(temp.path().join("page_dir/data.csv"), "a\n").unwrap();
        let registry = echo_registry(Rc::new(RefCell::new(Vec::new())));

        let err = process_document(
            "{{ read_csv(data.csv) }}",
            &temp.path().join("page_dir"),
            &project,
            &registry,
        )
        .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            TableReaderError::FileNotFound { searched, .. } if searched.len() == 1
        ));
    }

    #[test]
    fn test_repeated_identical_tags_each_rendered() {
        let (temp, project) = fixture();
        fs::write(temp.path().join("data/a.csv"), "x\n").unwrap();

        let counter = Rc::new(RefCell::new(0));
        let seen = counter.clone();
        let mut registry = ReaderRegistry::new();
        registry.register("read_csv", move |_: &ParsedCall| -> Result<String> {
            *seen.borrow_mut() += 1;
            Ok(format!("table #{}", seen.borrow()))
        });

        let source = "intro\n{{ read_csv(a.csv) }}\nmiddle\n{{ read_csv(a.csv) }}\nend";
        let out = process_document(source, &temp.path().join("page_dir"), &project, &registry)
            .unwrap();

        assert_eq!(out, "intro\ntable #1\nmiddle\ntable #2\nend");
        assert_eq!(*counter.borrow(), 2);
    }

    #[test]
    fn test_indentation_is_normalized() {
        let (temp, project) = fixture();
        fs::write(temp.path().join("data/a.csv"), "x\n").unwrap();
        let mut registry = ReaderRegistry::new();
        registry.register("read_csv", |_: &ParsedCall| -> Result<String> {
            Ok("| a |\n|---|\n| 1 |".to_string())
        });

        let source = "- item\n\n      {{ read_csv(a.csv) }}\n";
        let out = process_document(source, &temp.path().join("page_dir"), &project, &registry)
            .unwrap();
        assert_eq!(out, "- item\n\n    | a |\n    |---|\n    | 1 |\n");
    }

    #[test]
    fn test_keyword_path_is_resolved() {
        let (temp, project) = fixture();
        fs::write(temp.path().join("data/k.csv"), "x\n").unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = echo_registry(calls.clone());

        process_document(
            r#"{{ read_csv(filepath_or_buffer="k.csv", sep=";") }}"#,
            &temp.path().join("page_dir"),
            &project,
            &registry,
        )
        .unwrap();

        let calls = calls.borrow();
        let expected = temp.path().join("data").join("k.csv");
        assert_eq!(calls[0].str_keyword("filepath_or_buffer"), expected.to_str());
        let call = &calls[0];
        assert_eq!(call.str_keyword("sep"), Some(";"));
    }

    #[test]
    fn test_call_without_path_is_passed_through() {
        let (temp, project) = fixture();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = echo_registry(calls.clone());

        let out = process_document(
            "{{ read_csv(sep=',') }}",
            &temp.path().join("page_dir"),
            &project,
            &registry,
        )
        .unwrap();
        assert_eq!(out, "TABLE(-)");
    }

    #[test]
    fn test_non_string_path_is_rejected() {
        let (temp, project) = fixture();
        let registry = echo_registry(Rc::new(RefCell::new(Vec::new())));

        let err = process_document(
            "{{ read_csv(42) }}",
            &temp.path().join("page_dir"),
            &project,
            &registry,
        )
        .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            TableReaderError::ArgSyntax { .. }
        ));
    }

    #[test]
    fn test_argument_errors_abort_without_partial_output() {
        let (temp, project) = fixture();
        fs::write(temp.path().join("data/a.csv"), "x\n").unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = echo_registry(calls.clone());

        let source = "{{ read_csv(a.csv) }}\n{{ read_csv(a.csv, sep=1, sep=2) }}";
        let err = process_document(source, &temp.path().join("page_dir"), &project, &registry)
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            TableReaderError::DuplicateArgument { .. }
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_reader_error_propagates_unchanged() {
        let (temp, project) = fixture();
        fs::write(temp.path().join("data/a.csv"), "x\n").unwrap();
        let mut registry = ReaderRegistry::new();
        registry.register("read_csv", |_: &ParsedCall| -> Result<String> {
            Err(TableReaderError::render("read_csv", "corrupt file"))
        });

        let err = process_document(
            "{{ read_csv(a.csv) }}",
            &temp.path().join("page_dir"),
            &project,
            &registry,
        )
        .unwrap_err();
        match err.root_cause() {
            TableReaderError::Render { reader, message } => {
                assert_eq!(reader, "read_csv");
                assert_eq!(message, "corrupt file");
            }
            other => panic!("Expected Render, got {:?}", other),
        }
    }

    #[test]
    fn test_tags_processed_in_registry_order() {
        let (temp, project) = fixture();
        fs::write(temp.path().join("data/a.csv"), "x\n").unwrap();
        fs::write(temp.path().join("data/b.json"), "[]").unwrap();

        let mut registry = ReaderRegistry::new();
        registry
            .register("read_csv", |_: &ParsedCall| -> Result<String> { Ok("CSV".to_string()) })
            .register("read_json", |_: &ParsedCall| -> Result<String> { Ok("JSON".to_string()) });

        let source = "{{ read_json(b.json) }} then {{ READ_CSV(a.csv) }}";
        let out = process_document(source, &temp.path().join("page_dir"), &project, &registry)
            .unwrap();
        assert_eq!(out, "JSON thenCSV");
    }

    #[test]
    fn test_docs_dir_base_path() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs/tables")).unwrap();
        fs::write(temp.path().join("docs/tables/t.csv"), "x\n").unwrap();
        let config = Config {
            base_path: crate::infrastructure::BasePath::DocsDir,
            data_path: "tables".to_string(),
            search_page_directory: false,
            ..Config::default()
        };
        let project = Project::new(temp.path().to_path_buf(), config);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let registry = echo_registry(calls.clone());

        process_document(
            "{{ read_csv('t.csv') }}",
            &temp.path().join("docs"),
            &project,
            &registry,
        )
        .unwrap();
        let expected: PathBuf = temp.path().join("docs/tables/t.csv");
        assert_eq!(calls.borrow()[0].path(), expected.to_str());
    }

    struct CwdReader {
        seen: Rc<RefCell<Option<PathBuf>>>,
    }

    impl TableReader for CwdReader {
        fn render(&self, _call: &ParsedCall) -> Result<String> {
            *self.seen.borrow_mut() = Some(std::env::current_dir()?);
            Err(TableReaderError::render("read_cwd", "fails after looking"))
        }

        fn requires_working_dir(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_working_dir_reader_runs_in_base_dir_and_restores() {
        let _lock = crate::infrastructure::workdir::CWD_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let (temp, project) = fixture();
        fs::write(temp.path().join("data/a.csv"), "x\n").unwrap();
        let before = std::env::current_dir().unwrap();

        let seen = Rc::new(RefCell::new(None));
        let mut registry = ReaderRegistry::new();
        registry.register("read_cwd", CwdReader { seen: seen.clone() });

        let result = process_document(
            "{{ read_cwd(a.csv) }}",
            &temp.path().join("page_dir"),
            &project,
            &registry,
        );

        assert!(result.is_err());
        let inside = seen.borrow().clone().unwrap();
        assert_eq!(
            inside.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
