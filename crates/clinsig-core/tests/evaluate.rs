#![allow(missing_docs)]

use clinsig_core::evaluate::Evaluator;
use clinsig_core::ops::{Arity, default_registry};
use clinsig_model::{
    AnnotationError, AnnotationRecord, OutputType, OutputValue, PostAnnotation, RawFieldValue,
    RecordOutcome, Scalar,
};

fn clinvar_annotations() -> Vec<PostAnnotation> {
    vec![
        PostAnnotation::new("clinvar_sig", "clinvar_sig", OutputType::String, &["CLNSIG"]),
        PostAnnotation::new(
            "clinvar_pathogenic",
            "clinvar_pathogenic_flag",
            OutputType::Flag,
            &["CLNSIG_CODES"],
        ),
        PostAnnotation::new(
            "common_pathogenic",
            "check_clinvar_aaf",
            OutputType::Flag,
            &["clinvar_sig", "max_aaf_all"],
        )
        .with_cutoff(0.01),
        PostAnnotation::new("exac_af", "div2", OutputType::Float, &["AN_ref", "AC_alt"]),
    ]
}

fn render(outcome: &RecordOutcome) -> String {
    let mut lines = vec![format!("id={}", outcome.id.as_deref().unwrap_or("."))];
    for (name, value) in &outcome.columns {
        lines.push(format!("{name}={value}"));
    }
    for error in &outcome.errors {
        lines.push(format!("error {}: {}", error.column, error.error));
    }
    lines.join("\n")
}

#[test]
fn test_outputs_chain_into_later_annotations() {
    let annotations = clinvar_annotations();
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_id("rs80357906")
        .with_field(
            "CLNSIG",
            RawFieldValue::Sequence(vec!["4|5".into(), "2".into()]),
        )
        .with_field(
            "CLNSIG_CODES",
            RawFieldValue::Sequence(vec![Scalar::Integer(4), Scalar::Integer(5)]),
        )
        .with_field("max_aaf_all", 0.02)
        .with_field("AN_ref", 3_i64)
        .with_field("AC_alt", 7_i64);

    let outcome = evaluator.evaluate(&mut record);

    insta::assert_snapshot!(render(&outcome), @r"
    id=rs80357906
    clinvar_pathogenic=true
    clinvar_sig=likely-pathogenic|pathogenic,benign
    common_pathogenic=true
    exac_af=0.7
    ");
    assert_eq!(
        record.get("clinvar_sig"),
        Some(&RawFieldValue::from("likely-pathogenic|pathogenic,benign"))
    );
}

#[test]
fn test_false_flags_are_not_written() {
    let annotations = clinvar_annotations();
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("CLNSIG", "2")
        .with_field("CLNSIG_CODES", RawFieldValue::Sequence(vec![Scalar::Integer(2)]))
        .with_field("max_aaf_all", 0.3);

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(
        outcome.column("clinvar_sig"),
        Some(&OutputValue::Text("benign".to_string()))
    );
    assert_eq!(outcome.column("clinvar_pathogenic"), None);
    assert_eq!(outcome.column("common_pathogenic"), None);
    // div2 inputs absent: skipped without error.
    assert_eq!(outcome.column("exac_af"), None);
    assert!(!outcome.has_errors());
}

#[test]
fn test_failing_column_does_not_stop_others() {
    let annotations = clinvar_annotations();
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("CLNSIG", RawFieldValue::Sequence(vec!["4|".into()]))
        .with_field("CLNSIG_CODES", RawFieldValue::Sequence(vec![Scalar::Integer(5)]))
        .with_field("AN_ref", 0_i64)
        .with_field("AC_alt", 0_i64);

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].column, "clinvar_sig");
    assert!(matches!(
        outcome.errors[0].error,
        AnnotationError::MalformedField { .. }
    ));
    assert_eq!(outcome.column("clinvar_pathogenic"), Some(&OutputValue::Flag(true)));
    assert_eq!(outcome.column("exac_af"), Some(&OutputValue::Float(0.0)));
    // Nothing decoded, so the threshold check has no significance to read.
    assert_eq!(outcome.column("common_pathogenic"), None);
}

#[test]
fn test_batch_isolates_records() {
    let annotations = vec![PostAnnotation::new(
        "clinvar_sig",
        "clinvar_sig",
        OutputType::String,
        &["CLNSIG"],
    )];
    let evaluator = Evaluator::new(&annotations);
    let records = vec![
        AnnotationRecord::new().with_id("a").with_field("CLNSIG", "9"),
        AnnotationRecord::new().with_id("b").with_field("CLNSIG", "5"),
    ];

    let outcomes = evaluator.evaluate_batch(records);

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].has_errors());
    assert_eq!(
        outcomes[1].column("clinvar_sig"),
        Some(&OutputValue::Text("pathogenic".to_string()))
    );
    assert!(!outcomes[1].has_errors());
}

#[test]
fn test_unknown_code_substitution() {
    let annotations = vec![
        PostAnnotation::new("origin", "clinvar_origin", OutputType::String, &["CLNORIGIN"])
            .with_unknown_code("other"),
    ];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new().with_field(
        "CLNORIGIN",
        RawFieldValue::Sequence(vec![Scalar::Integer(1), Scalar::Integer(3)]),
    );

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(
        outcome.column("origin"),
        Some(&OutputValue::Text("germline,other".to_string()))
    );
}

#[test]
fn test_id_and_delete() {
    let annotations = vec![
        PostAnnotation::new("ID", "loc", OutputType::String, &["chrom", "start", "end"]),
        PostAnnotation::new("", "delete", OutputType::String, &["start", "end"]),
    ];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("chrom", "chr17")
        .with_field("start", 41_276_044_i64)
        .with_field("end", 41_276_045_i64);

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(outcome.id.as_deref(), Some("chr17:41276044-41276045"));
    assert!(outcome.columns.is_empty());
    assert!(record.get("start").is_none());
    assert!(record.get("end").is_none());
    assert!(record.get("chrom").is_some());
}

#[test]
fn test_unknown_op_is_reported_per_column() {
    let annotations = vec![PostAnnotation::new("x", "nope", OutputType::String, &["CLNSIG"])];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new().with_field("CLNSIG", "5");

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(
        outcome.errors[0].error,
        AnnotationError::UnknownOp {
            op: "nope".to_string()
        }
    );
}

#[test]
fn test_div_and_mean_ops() {
    let annotations = vec![
        PostAnnotation::new("het_ratio", "div", OutputType::String, &["het", "total"]),
        PostAnnotation::new("mean_depth", "mean", OutputType::Float, &["dp1", "dp2", "dp3"]),
    ];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("het", 1_i64)
        .with_field("total", 3_i64)
        .with_field("dp1", 10_i64)
        .with_field("dp3", RawFieldValue::Sequence(vec![Scalar::Float(20.0), Scalar::Float(30.0)]));

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(
        outcome.column("het_ratio"),
        Some(&OutputValue::Text("0.333333333".to_string()))
    );
    assert_eq!(outcome.column("mean_depth"), Some(&OutputValue::Float(20.0)));
}

#[test]
fn test_div2_flattens_to_bad() {
    let annotations = vec![PostAnnotation::new(
        "af",
        "div2",
        OutputType::Float,
        &["AC", "AN"],
    )];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("AC", RawFieldValue::Sequence(vec![Scalar::Integer(1), Scalar::Integer(2)]))
        .with_field("AN", 10_i64);

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(
        outcome.column("af"),
        Some(&OutputValue::Text("BAD".to_string()))
    );
}

#[test]
fn test_registry_contents() {
    let registry = default_registry();
    let names: Vec<&str> = registry.iter().map(|op| op.name()).collect();
    assert_eq!(
        names,
        vec![
            "check_clinvar_aaf",
            "clinvar_drug_response_flag",
            "clinvar_histocompatibility_flag",
            "clinvar_likely_pathogenic_flag",
            "clinvar_origin",
            "clinvar_pathogenic_flag",
            "clinvar_sig",
            "concat",
            "count",
            "delete",
            "div",
            "div2",
            "first",
            "flag",
            "loc",
            "max",
            "mean",
            "min",
            "self",
            "sum",
            "uniq",
        ]
    );
    let check = registry.get("check_clinvar_aaf").unwrap();
    assert!(check.requires_cutoff());
    assert_eq!(check.arity(), Arity::Exactly(2));
    assert!(!registry.get("clinvar_sig").unwrap().requires_cutoff());
    assert_eq!(registry.get("max").unwrap().arity(), Arity::AtLeast(1));
}

#[test]
fn test_max_feeds_threshold_check() {
    let annotations = vec![
        PostAnnotation::new(
            "max_aaf_all",
            "max",
            OutputType::Float,
            &["af_exac", "af_1kg", "af_gnomad"],
        ),
        PostAnnotation::new("clinvar_sig", "clinvar_sig", OutputType::String, &["CLNSIG"]),
        PostAnnotation::new(
            "common_pathogenic",
            "check_clinvar_aaf",
            OutputType::Flag,
            &["clinvar_sig", "max_aaf_all"],
        )
        .with_cutoff(0.01),
    ];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("CLNSIG", "5")
        .with_field("af_exac", 0.002)
        .with_field(
            "af_1kg",
            RawFieldValue::Sequence(vec![Scalar::Float(0.03), Scalar::Float(0.001)]),
        );

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(outcome.column("max_aaf_all"), Some(&OutputValue::Float(0.03)));
    assert_eq!(outcome.column("common_pathogenic"), Some(&OutputValue::Flag(true)));
    assert!(!outcome.has_errors());
}

#[test]
fn test_reducer_ops() {
    let fields = ["a", "b", "c"];
    let annotations = vec![
        PostAnnotation::new("total", "sum", OutputType::Float, &fields),
        PostAnnotation::new("lowest", "min", OutputType::Float, &fields),
        PostAnnotation::new("present", "count", OutputType::Integer, &fields),
        PostAnnotation::new("joined", "concat", OutputType::String, &fields),
        PostAnnotation::new("distinct", "uniq", OutputType::String, &fields),
        PostAnnotation::new("head", "first", OutputType::Integer, &fields),
        PostAnnotation::new("same", "self", OutputType::Integer, &["a"]),
        PostAnnotation::new("both", "self", OutputType::String, &["a", "c"]),
        PostAnnotation::new("seen", "flag", OutputType::Flag, &fields),
    ];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("a", 2_i64)
        .with_field("c", RawFieldValue::Sequence(vec![Scalar::Integer(2), Scalar::Integer(5)]));

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(outcome.column("total"), Some(&OutputValue::Float(9.0)));
    assert_eq!(outcome.column("lowest"), Some(&OutputValue::Float(2.0)));
    assert_eq!(outcome.column("present"), Some(&OutputValue::Integer(2)));
    assert_eq!(
        outcome.column("joined"),
        Some(&OutputValue::Text("2,2,5".to_string()))
    );
    assert_eq!(
        outcome.column("distinct"),
        Some(&OutputValue::Text("2,2,5".to_string()))
    );
    assert_eq!(outcome.column("head"), Some(&OutputValue::Integer(2)));
    assert_eq!(outcome.column("same"), Some(&OutputValue::Integer(2)));
    assert_eq!(
        outcome.column("both"),
        Some(&OutputValue::Text("2,2,5".to_string()))
    );
    assert_eq!(outcome.column("seen"), Some(&OutputValue::Flag(true)));
    assert!(!outcome.has_errors());
}

#[test]
fn test_uniq_drops_repeated_values() {
    let annotations = vec![PostAnnotation::new(
        "sources",
        "uniq",
        OutputType::String,
        &["src1", "src2", "src3"],
    )];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_field("src1", "clinvar")
        .with_field("src2", "exac")
        .with_field("src3", "clinvar");

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(
        outcome.column("sources"),
        Some(&OutputValue::Text("clinvar,exac".to_string()))
    );
}

#[test]
fn test_record_id_is_readable_as_field() {
    let annotations = vec![
        PostAnnotation::new("rsid", "self", OutputType::String, &["ID"]),
        PostAnnotation::new("tagged", "concat", OutputType::String, &["ID", "gene"]),
    ];
    let evaluator = Evaluator::new(&annotations);
    let mut record = AnnotationRecord::new()
        .with_id("rs80357906")
        .with_field("gene", "BRCA1");

    let outcome = evaluator.evaluate(&mut record);

    assert_eq!(
        outcome.column("rsid"),
        Some(&OutputValue::Text("rs80357906".to_string()))
    );
    assert_eq!(
        outcome.column("tagged"),
        Some(&OutputValue::Text("rs80357906,BRCA1".to_string()))
    );

    let mut anonymous = AnnotationRecord::new().with_field("gene", "BRCA1");
    let outcome = evaluator.evaluate(&mut anonymous);
    assert_eq!(outcome.column("rsid"), None);
}
