//! Integration tests for the review-inclusive (`jsonrqc`) export

mod common;

use common::{chair, pid, CapturingTransport, FixedOracle, MemoryDocuments, MemoryRecords, MemoryReviews};
use quire::core::export::{ExportAction, ExportAssembler, ExportSettings};
use quire::domain::{
    FieldKind, FieldVisibility, Paper, QuireError, Review, ReviewField, ReviewForm, ReviewId,
    Selection, PERMISSION_DENIED,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn form() -> ReviewForm {
    ReviewForm {
        fields: vec![
            ReviewField {
                id: "overall".to_string(),
                name: "Overall merit".to_string(),
                kind: FieldKind::Score {
                    values: vec!["Reject".to_string(), "Accept".to_string()],
                },
                description: None,
                visibility: FieldVisibility::Author,
                required: true,
            },
            ReviewField {
                id: "to_pc".to_string(),
                name: "Comments to PC".to_string(),
                kind: FieldKind::Text,
                description: None,
                visibility: FieldVisibility::Admin,
                required: false,
            },
        ],
    }
}

fn review(rid: u64, email: &str, ordinal: Option<u32>, submitted: bool) -> Review {
    let mut fields = Map::new();
    fields.insert("overall".to_string(), json!(2));
    fields.insert("to_pc".to_string(), json!("confidential"));
    Review {
        rid: ReviewId::new(rid).unwrap(),
        reviewer_email: email.to_string(),
        reviewer_name: None,
        ordinal,
        submitted,
        submitted_at: None,
        fields,
        ratings: Vec::new(),
    }
}

fn paper(n: u64) -> Paper {
    Paper::builder(pid(n)).title(format!("Paper {n}")).build()
}

fn rqc_assembler(papers: Vec<Paper>, oracle: FixedOracle, reviews: MemoryReviews) -> ExportAssembler {
    ExportAssembler::new(
        Arc::new(MemoryRecords::new(papers)),
        Arc::new(oracle),
        Arc::new(MemoryDocuments::default()),
        ExportSettings {
            commit: Some("4f1c2a9".to_string()),
            ..ExportSettings::default()
        },
    )
    .with_reviews(Arc::new(reviews))
}

#[tokio::test]
async fn test_rqc_manifest_shape() {
    let reviews = MemoryReviews::new(form())
        .with(1, review(11, "b@example.org", Some(2), true))
        .with(1, review(10, "a@example.org", Some(1), true))
        .with(1, review(12, "draft@example.org", None, false));
    let export = rqc_assembler(vec![paper(1)], FixedOracle::administering(&[1]), reviews);

    let mut transport = CapturingTransport::default();
    export
        .export(
            &chair(),
            ExportAction::JsonRqc,
            &Selection::parse("1").unwrap(),
            &mut transport,
        )
        .await
        .unwrap();

    let download = &transport.delivered[0];
    assert_eq!(download.filename, "rqc.json");
    let body: Value = serde_json::from_slice(&download.body).unwrap();

    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["hotcrp_version", "hotcrp_commit", "reviewform", "papers"]);
    assert_eq!(body["hotcrp_version"], json!(env!("CARGO_PKG_VERSION")));
    assert_eq!(body["hotcrp_commit"], json!("4f1c2a9"));

    // Only fields visible beyond reviewers make it into the form schema.
    let form_ids: Vec<&Value> = body["reviewform"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| &f["id"])
        .collect();
    assert_eq!(form_ids, vec![&json!("overall")]);

    let papers = body["papers"].as_array().unwrap();
    assert_eq!(papers.len(), 1);
    let reviews = papers[0]["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["rid"], json!(10));
    assert_eq!(reviews[0]["ordinal"], json!("A"));
    assert_eq!(reviews[1]["ordinal"], json!("B"));
    assert_eq!(reviews[0]["fields"], json!({"overall": 2}));
}

#[tokio::test]
async fn test_hidden_reviews_are_left_out() {
    let reviews = MemoryReviews::new(form())
        .with(2, review(20, "hidden@example.org", Some(1), true))
        .with(3, review(30, "visible@example.org", Some(1), true));
    let export = rqc_assembler(
        vec![paper(2), paper(3)],
        FixedOracle::administering(&[2, 3]).hiding_reviews_by("hidden@example.org"),
        reviews,
    );

    let artifact = export
        .build(&chair(), ExportAction::JsonRqc, &Selection::parse("3,2").unwrap())
        .await
        .unwrap();

    let body: Value = serde_json::from_slice(&artifact.download.body).unwrap();
    let papers = body["papers"].as_array().unwrap();
    assert_eq!(papers[0]["pid"], json!(3));
    assert_eq!(papers[0]["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(papers[1]["pid"], json!(2));
    assert!(papers[1].get("reviews").is_none());
}

#[tokio::test]
async fn test_rqc_papers_stay_an_array_with_denied_entries() {
    let export = rqc_assembler(
        vec![paper(5)],
        FixedOracle::administering(&[]),
        MemoryReviews::new(form()).with(5, review(50, "r@example.org", Some(1), true)),
    );

    let artifact = export
        .build(&chair(), ExportAction::JsonRqc, &Selection::parse("5").unwrap())
        .await
        .unwrap();

    let body: Value = serde_json::from_slice(&artifact.download.body).unwrap();
    assert_eq!(
        body["papers"],
        json!([{"pid": 5, "error": PERMISSION_DENIED}])
    );
    assert_eq!(artifact.summary.denied, 1);
}

#[tokio::test]
async fn test_rqc_with_prefix_and_no_papers() {
    let export = ExportAssembler::new(
        Arc::new(MemoryRecords::new(Vec::new())),
        Arc::new(FixedOracle::administering(&[])),
        Arc::new(MemoryDocuments::default()),
        ExportSettings {
            download_prefix: "popl27-".to_string(),
            ..ExportSettings::default()
        },
    )
    .with_reviews(Arc::new(MemoryReviews::new(form())));

    let artifact = export
        .build(&chair(), ExportAction::JsonRqc, &Selection::parse("8").unwrap())
        .await
        .unwrap();

    assert_eq!(artifact.download.filename, "popl27-rqc.json");
    let body: Value = serde_json::from_slice(&artifact.download.body).unwrap();
    assert_eq!(body["papers"], json!([]));
}

#[tokio::test]
async fn test_rqc_without_review_source_is_a_configuration_error() {
    let export = ExportAssembler::new(
        Arc::new(MemoryRecords::new(vec![paper(1)])),
        Arc::new(FixedOracle::administering(&[1])),
        Arc::new(MemoryDocuments::default()),
        ExportSettings::default(),
    );

    let err = export
        .build(&chair(), ExportAction::JsonRqc, &Selection::parse("1").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, QuireError::Configuration(_)));
}
