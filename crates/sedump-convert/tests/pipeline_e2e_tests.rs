//! End-to-end tests: dump file in, loaded chunks out

mod common;

use common::{fixture_path, test_config, write_votes, CapturingLoader};
use sedump_common::types::Entity;
use sedump_common::SedumpError;
use sedump_convert::pipeline;
use sedump_convert::record::headers;
use sedump_convert::ConvertError;
use tempfile::TempDir;

// ============================================================================
// FIXTURE SCENARIOS
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_tags_single_chunk() {
    let out = TempDir::new().unwrap();
    let loader = CapturingLoader::new();

    let input = fixture_path("Tags.xml");
    let summary = pipeline::run(&input, &test_config(out.path(), 3), loader.clone())
        .await
        .expect("conversion succeeds");

    assert_eq!(summary.entity, Entity::Tags);
    assert_eq!((summary.rows, summary.skipped, summary.chunks), (3, 0, 1));

    let seen = loader.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].file_name, "1_tags.csv");
    assert_eq!(
        seen[0].lines(),
        vec![
            "id,tag_name,count,excerpt_post_id,wiki_post_id",
            "1,c++,10,,",
            "2,go,0,5,",
            "3,rust,2,,9",
        ]
    );

    // Loaded chunks are removed
    assert!(!out.path().join("1_tags.csv").exists());
    assert!(summary.report.is_clean());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_comment_text_escapes_copy_terminator() {
    let out = TempDir::new().unwrap();
    let loader = CapturingLoader::new();

    let input = fixture_path("Comments.xml");
    let summary = pipeline::run(&input, &test_config(out.path(), 10), loader.clone())
        .await
        .unwrap();
    assert_eq!((summary.rows, summary.skipped), (3, 0));

    let seen = loader.seen();
    let mut reader = csv::Reader::from_reader(seen[0].content.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(&rows[0][3], r"end\\.now");
    assert_eq!(&rows[0][6], "7");
    assert_eq!(&rows[1][3], "a, \"quoted\" reply\non two lines");
    assert_eq!(&rows[1][5], "anon");
    assert_eq!(&rows[1][6], "", "absent user id renders empty");
    assert_eq!(&rows[2][6], "-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_keep_community_user_and_skip_bad_rows() {
    let out = TempDir::new().unwrap();
    let loader = CapturingLoader::new();

    let input = fixture_path("Users.xml");
    let summary = pipeline::run(&input, &test_config(out.path(), 10), loader.clone())
        .await
        .unwrap();

    assert_eq!((summary.rows, summary.skipped), (3, 1));

    let seen = loader.seen();
    let mut reader = csv::Reader::from_reader(seen[0].content.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[0][0], "-1");
    assert_eq!(&rows[0][3], "Community");
    assert_eq!(&rows[1][3], "Geoff");
    assert_eq!(&rows[1][6], "Corvallis, OR");
    assert_eq!(&rows[1][7], "<p>Hello</p>");
    assert_eq!(&rows[1][12], "2");
    assert_eq!(&rows[2][12], "");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_every_fixture_keeps_header_and_row_arity() {
    for entity in Entity::ALL {
        let out = TempDir::new().unwrap();
        let loader = CapturingLoader::new();
        let input = fixture_path(&format!("{}.xml", capitalized(entity.table_name())));

        pipeline::run(&input, &test_config(out.path(), 1), loader.clone())
            .await
            .unwrap();

        let expected_columns = headers(entity).len();
        for chunk in loader.seen() {
            let mut reader = csv::Reader::from_reader(chunk.content.as_bytes());
            assert_eq!(reader.headers().unwrap().len(), expected_columns, "{entity}");
            for record in reader.records() {
                assert_eq!(record.unwrap().len(), expected_columns, "{entity}");
            }
        }
    }
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// CHUNKING
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_chunk_count_and_size() {
    for (rows, threshold) in [(0u64, 4u64), (1, 4), (4, 4), (5, 4), (12, 4), (13, 5)] {
        let dir = TempDir::new().unwrap();
        let input = write_votes(dir.path(), rows);
        let out = dir.path().join("out");
        let loader = CapturingLoader::new();

        let summary = pipeline::run(&input, &test_config(&out, threshold), loader.clone())
            .await
            .unwrap();

        let expected = rows.div_ceil(threshold).max(1) as u32;
        assert_eq!(summary.chunks, expected, "rows={rows} threshold={threshold}");
        assert_eq!(summary.rows, rows);

        let seen = loader.seen();
        assert_eq!(seen.len() as u32, expected);
        let data_rows: u64 = seen
            .iter()
            .map(|chunk| {
                let count = chunk.lines().len() as u64 - 1;
                assert!(count <= threshold, "{} holds {count} rows", chunk.file_name);
                count
            })
            .sum();
        assert_eq!(data_rows, rows);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_chunks_are_loaded_in_index_order() {
    let dir = TempDir::new().unwrap();
    let input = write_votes(dir.path(), 10);
    let loader = CapturingLoader::new();

    pipeline::run(&input, &test_config(dir.path(), 2), loader.clone())
        .await
        .unwrap();

    let names: Vec<String> = loader.seen().into_iter().map(|c| c.file_name).collect();
    assert_eq!(
        names,
        vec!["1_votes.csv", "2_votes.csv", "3_votes.csv", "4_votes.csv", "5_votes.csv"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rows_keep_document_order_across_chunks() {
    let dir = TempDir::new().unwrap();
    let input = write_votes(dir.path(), 7);
    let loader = CapturingLoader::new();

    pipeline::run(&input, &test_config(dir.path(), 3), loader.clone())
        .await
        .unwrap();

    let ids: Vec<u64> = loader
        .seen()
        .iter()
        .flat_map(|chunk| {
            chunk
                .lines()
                .into_iter()
                .skip(1)
                .map(|line| line.split(',').next().unwrap().parse().unwrap())
                .collect::<Vec<u64>>()
        })
        .collect();
    assert_eq!(ids, (1..=7).collect::<Vec<u64>>());
}

// ============================================================================
// FAILURES
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_load_keeps_chunk_file() {
    let dir = TempDir::new().unwrap();
    let input = write_votes(dir.path(), 6);
    let out = dir.path().join("out");
    let loader = CapturingLoader::new().rejecting(&[2]);

    let summary = pipeline::run(&input, &test_config(&out, 2), loader.clone())
        .await
        .expect("a failed load is not fatal");

    assert_eq!(loader.seen_chunks(), vec![1, 2, 3]);
    assert_eq!(summary.report.failed, vec![out.join("2_votes.csv")]);
    assert_eq!(summary.report.loaded.len(), 2);
    assert!(!out.join("1_votes.csv").exists());
    assert!(out.join("2_votes.csv").exists());
    assert!(!out.join("3_votes.csv").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsupported_file_name_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Posts.xml");
    std::fs::write(&input, "<posts></posts>").unwrap();
    let loader = CapturingLoader::new();

    let err = pipeline::run(&input, &test_config(dir.path(), 10), loader.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Common(SedumpError::UnsupportedInput(_))));
    assert!(loader.seen().is_empty());
    assert!(!dir.path().join("1_posts.csv").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();

    let err = pipeline::run(
        &dir.path().join("Tags.xml"),
        &test_config(dir.path(), 10),
        CapturingLoader::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ConvertError::OpenInput { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path(), 10);
    config.queue_capacity = 0;

    let err = pipeline::run(&fixture_path("Tags.xml"), &config, CapturingLoader::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Common(SedumpError::Config(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sealed_chunks_are_loaded_before_xml_error_propagates() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Tags.xml");
    std::fs::write(
        &input,
        r#"<tags>
  <row Id="1" TagName="a" Count="1" />
  <row Id="2" TagName="b" Count="1" />
</badges>"#,
    )
    .unwrap();
    let loader = CapturingLoader::new();

    let err = pipeline::run(&input, &test_config(dir.path(), 1), loader.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Xml(_)));
    assert_eq!(loader.seen_chunks(), vec![1, 2]);
}
