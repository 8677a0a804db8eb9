use crate::{AnnotationSink, ImportConfig, ImportError, Importer, MemorySink, SourceDir};
use layered_conllu::{
    parse_records, ConlluError, Diagnostics, ElementKind, ElementTable, MismatchPolicy,
    ParseOptions, Span, TokenId,
};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn fixtures() -> Importer {
    Importer::from_config(&ImportConfig::new(fixture_dir()))
}

fn offsets(spans: &[Span]) -> Vec<(usize, usize)> {
    spans.iter().map(|s| (s.start.offset, s.end.offset)).collect()
}

/// Records the order of sink calls.
#[derive(Default)]
struct RecordingSink {
    calls: Vec<String>,
    reject_elements: bool,
}

impl AnnotationSink for RecordingSink {
    fn write_text(&mut self, file: &str, _text: &str) -> Result<(), String> {
        self.calls.push(format!("{}:text", file));
        Ok(())
    }

    fn write_element(&mut self, file: &str, table: &ElementTable) -> Result<(), String> {
        if self.reject_elements {
            return Err("read-only storage".to_string());
        }
        self.calls.push(format!("{}:element:{}", file, table.name()));
        Ok(())
    }

    fn write_structure(&mut self, file: &str, _structure: &[String]) -> Result<(), String> {
        self.calls.push(format!("{}:structure", file));
        Ok(())
    }
}

#[test]
fn test_fixture_names() {
    let names = fixtures().source().file_names().unwrap();
    assert_eq!(
        names,
        vec![
            "contractions",
            "deprel-cases",
            "empty-node",
            "multiword",
            "paragraph-and-document",
            "paragraph-in-sentence",
            "sentence-comments",
            "space-after-no",
        ]
    );
}

#[test]
fn test_import_all_fixtures() {
    let importer = fixtures();
    let mut sink = MemorySink::new();
    let report = importer.import_all(&mut sink).unwrap();

    assert!(report.is_success(), "failed: {:?}", report.failed);
    assert_eq!(report.imported.len(), 8);
    assert_eq!(sink.len(), 8);

    for imported in &report.imported {
        assert!(imported.diagnostics.is_empty(), "{}", imported.file);
        let stored = sink.get(&imported.file).unwrap();
        assert_eq!(stored.text.chars().count(), imported.chars);

        // the analyzer predicts exactly what a full parse produces
        let predicted: Vec<String> = importer
            .analyze_file(&imported.file)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(predicted, stored.structure, "{}", imported.file);
    }
}

#[test]
fn test_space_after_no() {
    let layer = fixtures().parse_file("space-after-no").unwrap();

    assert_eq!(layer.text, "The quick brown fox jumps over the lazy dog.");
    let tokens = layer.table(ElementKind::Token).unwrap();
    assert_eq!(tokens.spans[8].end.offset, tokens.spans[9].start.offset);
    assert_eq!(
        layer.table(ElementKind::Sentence).unwrap().spans,
        vec![Span::of_kind(ElementKind::Sentence, 0, 44)]
    );
    assert_eq!(
        layer.table(ElementKind::Text).unwrap().spans,
        vec![Span::of_kind(ElementKind::Text, 0, 44)]
    );
}

#[test]
fn test_multiword() {
    let layer = fixtures().parse_file("multiword").unwrap();

    assert_eq!(layer.text, "We really just can't wait.");
    let tokens = layer.table(ElementKind::Token).unwrap();
    assert_eq!(tokens.values("id").unwrap(), ["1", "2", "3", "4", "5", "6", "7"]);
    assert_eq!(layer.slice(&tokens.spans[3]), "ca");
    assert_eq!(layer.slice(&tokens.spans[4]), "n't");
}

#[test]
fn test_contractions_without_sub_token_spacing() {
    let layer = fixtures().parse_file("contractions").unwrap();

    assert_eq!(layer.text, "We can't wait.\nDon't go.");
    assert!(layer.diagnostics.is_empty());
    let tokens = layer.table(ElementKind::Token).unwrap();
    assert_eq!(tokens.values("id").unwrap(), ["1", "2", "3", "4", "5", "1", "2", "3", "4"]);
    assert_eq!(
        offsets(&tokens.spans),
        vec![
            (0, 2),
            (3, 5),
            (5, 8),
            (9, 13),
            (13, 14),
            (15, 17),
            (17, 20),
            (21, 23),
            (23, 24),
        ]
    );
    assert_eq!(
        offsets(&layer.table(ElementKind::Sentence).unwrap().spans),
        vec![(0, 14), (15, 24)]
    );
}

#[test]
fn test_empty_node() {
    let importer = fixtures();
    let layer = importer.parse_file("empty-node").unwrap();

    assert_eq!(layer.text, "Sue likes coffee and Bill tea.");
    let tokens = layer.table(ElementKind::Token).unwrap();
    assert_eq!(tokens.len(), 7);
    assert!(!tokens.values("misc").unwrap().iter().any(|misc| misc.contains("CopyOf")));

    let content = importer.source().read("empty-node").unwrap();
    let mut diagnostics = Diagnostics::new("empty-node");
    let records = parse_records(&content, &mut diagnostics).unwrap();
    assert_eq!(records[0].find_root(TokenId::Empty(5, 1)), Ok(TokenId::Plain(2)));
}

#[test]
fn test_deprel_cases_range_roots() {
    let importer = fixtures();
    let content = importer.source().read("deprel-cases").unwrap();
    let mut diagnostics = Diagnostics::new("deprel-cases");
    let records = parse_records(&content, &mut diagnostics).unwrap();

    let roots: Vec<_> = records
        .iter()
        .flat_map(|record| {
            record
                .tokens
                .iter()
                .filter(|token| matches!(token.id, TokenId::Range(..)))
                .map(move |token| record.find_root(token.id))
        })
        .collect();
    assert_eq!(roots, vec![Ok(TokenId::Plain(1)), Ok(TokenId::Plain(3))]);

    let layer = importer.parse_file("deprel-cases").unwrap();
    assert_eq!(layer.text, "Dámelo ya.\nAni babayit.");
}

#[test]
fn test_paragraph_and_document() {
    let layer = fixtures().parse_file("paragraph-and-document").unwrap();

    let documents = layer.table(ElementKind::Document).unwrap();
    assert_eq!(offsets(&documents.spans), vec![(0, 16), (17, 22)]);
    assert_eq!(documents.values("id").unwrap(), ["doc-1", "doc-2"]);

    let paragraphs = layer.table(ElementKind::Paragraph).unwrap();
    assert_eq!(offsets(&paragraphs.spans), vec![(0, 9), (10, 16), (17, 22)]);
    assert_eq!(paragraphs.values("id").unwrap(), ["doc-1-p1", "doc-1-p2", ""]);
}

#[test]
fn test_paragraph_in_sentence() {
    let layer = fixtures().parse_file("paragraph-in-sentence").unwrap();

    assert_eq!(layer.text, "Chapter One It was a dark night.");
    let breaks = layer.table(ElementKind::SentenceParagraph).unwrap();
    assert_eq!(offsets(&breaks.spans), vec![(0, 12), (12, 32)]);
    assert_eq!(layer.slice(&breaks.spans[1]), "It was a dark night.");
}

#[test]
fn test_sentence_comments() {
    let layer = fixtures().parse_file("sentence-comments").unwrap();

    assert_eq!(layer.text, "Hi there!\nBye.");
    let sentences = layer.table(ElementKind::Sentence).unwrap();
    assert_eq!(
        sentences.attributes.keys().collect::<Vec<_>>(),
        vec!["sent_id", "sent_speaker"]
    );
    assert_eq!(sentences.values("sent_speaker").unwrap(), ["A", ""]);
}

#[test]
fn test_sink_call_order() {
    let mut sink = RecordingSink::default();
    fixtures().import_file("space-after-no", &mut sink).unwrap();

    assert_eq!(
        sink.calls,
        vec![
            "space-after-no:text",
            "space-after-no:element:text",
            "space-after-no:element:document",
            "space-after-no:element:sentence",
            "space-after-no:element:token",
            "space-after-no:structure",
        ]
    );
}

#[test]
fn test_sink_error() {
    let mut sink = RecordingSink {
        reject_elements: true,
        ..Default::default()
    };
    let result = fixtures().import_file("multiword", &mut sink);
    assert!(matches!(result, Err(ImportError::Sink { ref file, .. }) if file == "multiword"));
}

const GOOD: &str = "1\tYes\tyes\tINTJ\t_\t_\t0\troot\t_\t_\n";
const BAD: &str = "# text = Not this\n1\tYes\tyes\tINTJ\t_\t_\t0\troot\t_\t_\n";

#[test]
fn test_failing_file_writes_nothing_and_batch_continues() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.conllu"), BAD).unwrap();
    fs::write(dir.path().join("good.conllu"), GOOD).unwrap();

    let importer = Importer::new(SourceDir::new(dir.path(), "conllu"), ParseOptions::default());
    let mut sink = MemorySink::new();
    let report = importer.import_all(&mut sink).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].file, "good");
    assert_eq!(report.failed.len(), 1);
    let (name, error) = &report.failed[0];
    assert_eq!(name, "bad");
    assert!(matches!(
        error,
        ImportError::Parse {
            source: ConlluError::TextMismatch { .. },
            ..
        }
    ));
    assert_eq!(sink.file_names().collect::<Vec<_>>(), vec!["good"]);
}

#[test]
fn test_reconstruct_policy_from_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("texts")).unwrap();
    fs::write(dir.path().join("texts").join("bad.conllu"), BAD).unwrap();
    fs::write(
        dir.path().join("import.toml"),
        "source_dir = \"texts\"\n\n[parse]\non_text_mismatch = \"reconstruct\"\n",
    )
    .unwrap();

    let config = ImportConfig::load(&dir.path().join("import.toml")).unwrap();
    assert_eq!(config.parse.on_text_mismatch, MismatchPolicy::Reconstruct);

    let mut sink = MemorySink::new();
    let report = Importer::from_config(&config).import_all(&mut sink).unwrap();
    assert!(report.is_success());
    assert_eq!(sink.get("bad").unwrap().text, "Yes");
}

#[test]
fn test_import_dotted_file_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en_ewt-ud-test.excerpt.conllu"), GOOD).unwrap();

    let importer = Importer::new(SourceDir::new(dir.path(), "conllu"), ParseOptions::default());
    let mut sink = MemorySink::new();
    let report = importer.import_all(&mut sink).unwrap();

    assert!(report.is_success(), "failed: {:?}", report.failed);
    assert_eq!(sink.get("en_ewt-ud-test.excerpt").unwrap().text, "Yes");
}
