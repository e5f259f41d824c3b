use anyhow::Result;
use clap::{Parser, Subcommand};
use sift_core::{search, Analyzer, Document, Field, IndexStore, IndexWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Build and query a full-text index over a directory of files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the direct child files of a source directory
    Build {
        /// Source directory to ingest
        #[arg(long)]
        source: String,
        /// Output index directory
        #[arg(long)]
        index: String,
    },
    /// Run a single-term query against a built index
    Search {
        /// Index directory
        #[arg(long)]
        index: String,
        /// Term to look up
        #[arg(long)]
        term: String,
        /// Field to query
        #[arg(long, default_value = "fileContent")]
        field: String,
        /// Maximum number of hits
        #[arg(long, default_value_t = 10)]
        top_k: usize,
    },
    /// Print the analyzer's view of a piece of text
    Analyze {
        text: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source, index } => build(Path::new(&source), Path::new(&index)),
        Commands::Search { index, term, field, top_k } => {
            run_search(Path::new(&index), &field, &term, top_k)
        }
        Commands::Analyze { text } => {
            analyze(&text);
            Ok(())
        }
    }
}

struct SourceFile {
    name: String,
    size: i64,
    path: PathBuf,
    content: String,
}

/// Direct child files of `source`, read as UTF-8 text, in file-name order.
/// Subdirectories are not entered; unreadable files are skipped.
fn walk_source(source: &Path) -> Vec<SourceFile> {
    let mut files = Vec::new();
    for entry in WalkDir::new(source)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        let content = match std::fs::read_to_string(p) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %p.display(), %err, "skipping unreadable file");
                continue;
            }
        };
        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = entry.metadata().map(|m| m.len() as i64).unwrap_or(0);
        let path = std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
        files.push(SourceFile { name, size, path, content });
    }
    files
}

fn build(source: &Path, index: &Path) -> Result<()> {
    let mut writer = IndexWriter::open(index, Analyzer::new())?;
    let mut ingested = 0u32;
    for file in walk_source(source) {
        let mut doc = Document::new();
        doc.add(Field::text("fileName", file.name));
        doc.add(Field::number("fileSize", file.size));
        doc.add(Field::stored("filePath", file.path.to_string_lossy()));
        doc.add(Field::unstored_text("fileContent", file.content));
        writer.add_document(doc)?;
        ingested += 1;
    }
    writer.close()?;
    tracing::info!(ingested, "build finished");
    Ok(())
}

fn run_search(index: &Path, field: &str, term: &str, top_k: usize) -> Result<()> {
    let store = IndexStore::open(index)?;
    let hits = search(&store, field, term, top_k)?;
    println!("{} hit(s) for {term:?} in {field:?}", hits.len());
    for hit in hits {
        print!("doc {:>4}  score {:.4}", hit.doc_id, hit.score);
        for (name, value) in hit.fields.iter() {
            print!("  {name}: {value}");
        }
        println!();
    }
    Ok(())
}

fn analyze(text: &str) {
    let analyzer = Analyzer::new();
    for token in analyzer.analyze(text) {
        println!("{:>3} [{}..{}] {}", token.position, token.start, token.end, token.term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::FieldValue;
    use tempfile::tempdir;

    #[test]
    fn builds_and_searches_a_directory() {
        let source = tempdir().unwrap();
        std::fs::write(source.path().join("a.txt"), "alpha beta").unwrap();
        std::fs::write(source.path().join("b.txt"), "beta beta gamma").unwrap();
        std::fs::write(source.path().join("c.txt"), "gamma").unwrap();
        let index = tempdir().unwrap();

        build(source.path(), index.path()).unwrap();

        let store = IndexStore::open(index.path()).unwrap();
        assert_eq!(store.doc_count(), 3);

        let hits = search(&store, "fileContent", "beta", 10).unwrap();
        let names: Vec<&str> = hits
            .iter()
            .map(|h| match h.fields.get("fileName") {
                Some(FieldValue::Text(s)) => s.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(names, ["b.txt", "a.txt"]);

        assert!(search(&store, "fileContent", "delta", 10).unwrap().is_empty());
    }

    #[test]
    fn walk_does_not_recurse() {
        let source = tempdir().unwrap();
        std::fs::write(source.path().join("top.txt"), "alpha").unwrap();
        std::fs::create_dir(source.path().join("nested")).unwrap();
        std::fs::write(source.path().join("nested/deep.txt"), "alpha").unwrap();

        let files = walk_source(source.path());
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["top.txt"]);
    }
}
