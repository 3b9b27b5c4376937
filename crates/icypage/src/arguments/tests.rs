use crate::{
    arguments::{PagingArgument, PagingArguments, PagingValidationError, RawPagingArguments},
    cursor::{CursorDecodeError, encode_cursor},
    options::PagingOptions,
};

fn options(default: Option<u32>, max: Option<u32>) -> PagingOptions {
    PagingOptions {
        default_page_size: default,
        max_page_size: max,
        ..PagingOptions::unbounded()
    }
}

fn forward_only() -> PagingOptions {
    PagingOptions {
        allow_backward_pagination: false,
        ..PagingOptions::unbounded()
    }
}

#[test]
fn parse_without_arguments_or_defaults_is_unbounded() {
    let args = PagingArguments::parse(&RawPagingArguments::new(), &PagingOptions::unbounded())
        .expect("empty arguments should parse");

    assert_eq!(args, PagingArguments::default());
}

#[test]
fn parse_applies_default_page_size_to_first() {
    let args = PagingArguments::parse(&RawPagingArguments::new(), &options(Some(2), None))
        .expect("empty arguments should parse");

    assert_eq!(args, PagingArguments::forward(Some(2), None));
}

#[test]
fn parse_falls_back_to_max_page_size_as_default() {
    let args = PagingArguments::parse(&RawPagingArguments::new(), &options(None, Some(5)))
        .expect("empty arguments should parse");

    assert_eq!(args.first(), Some(5));
}

#[test]
fn parse_applies_default_to_last_for_backward_only_requests() {
    let raw = RawPagingArguments::new().before(encode_cursor(6).into_string());
    let args = PagingArguments::parse(&raw, &options(Some(2), None))
        .expect("backward-only arguments should parse");

    assert_eq!(args, PagingArguments::backward(Some(2), Some(6)));
}

#[test]
fn parse_does_not_default_when_one_count_is_present() {
    let raw = RawPagingArguments::new().last(3);
    let args = PagingArguments::parse(&raw, &options(Some(2), None))
        .expect("last-only arguments should parse");

    assert_eq!(args, PagingArguments::backward(Some(3), None));
}

#[test]
fn parse_decodes_cursors_into_positions() {
    let raw = RawPagingArguments::new()
        .first(2)
        .after("MQ==")
        .last(1)
        .before(encode_cursor(9).into_string());
    let args = PagingArguments::parse(&raw, &PagingOptions::unbounded())
        .expect("combined arguments should parse");

    assert_eq!(args, PagingArguments::new(Some(2), Some(1), Some(1), Some(9)));
}

#[test]
fn parse_rejects_backward_arguments_when_disabled() {
    for raw in [
        RawPagingArguments::new().last(1),
        RawPagingArguments::new().before("MQ=="),
        RawPagingArguments::new().first(1).before("MQ=="),
    ] {
        let err = PagingArguments::parse(&raw, &forward_only())
            .expect_err("backward arguments must be rejected");
        assert_eq!(err, PagingValidationError::BackwardPaginationDisabled);
    }
}

#[test]
fn parse_checks_backward_permission_before_sign() {
    let raw = RawPagingArguments::new().last(-1);
    let err = PagingArguments::parse(&raw, &forward_only())
        .expect_err("disabled backward pagination is reported first");

    assert_eq!(err, PagingValidationError::BackwardPaginationDisabled);
}

#[test]
fn parse_rejects_negative_counts() {
    let err = PagingArguments::parse(
        &RawPagingArguments::new().first(-1),
        &PagingOptions::unbounded(),
    )
    .expect_err("negative first must be rejected");
    assert_eq!(
        err,
        PagingValidationError::NegativeCount {
            argument: PagingArgument::First,
            value: -1,
        }
    );

    let err = PagingArguments::parse(
        &RawPagingArguments::new().last(-3),
        &PagingOptions::unbounded(),
    )
    .expect_err("negative last must be rejected");
    assert_eq!(
        err,
        PagingValidationError::NegativeCount {
            argument: PagingArgument::Last,
            value: -3,
        }
    );
}

#[test]
fn parse_rejects_page_size_above_max_instead_of_clamping() {
    let err = PagingArguments::parse(&RawPagingArguments::new().first(5), &options(None, Some(2)))
        .expect_err("oversized first must be rejected");

    assert_eq!(
        err,
        PagingValidationError::PageSizeExceeded {
            argument: PagingArgument::First,
            requested: 5,
            max: 2,
        }
    );
}

#[test]
fn parse_rejects_counts_beyond_u32_against_max() {
    let raw = RawPagingArguments::new().last(i64::MAX);
    let err = PagingArguments::parse(&raw, &options(None, Some(50)))
        .expect_err("huge last must be rejected");

    assert_eq!(
        err,
        PagingValidationError::PageSizeExceeded {
            argument: PagingArgument::Last,
            requested: u32::MAX,
            max: 50,
        }
    );
}

#[test]
fn parse_accepts_zero_and_exact_max() {
    let opts = options(None, Some(2));

    let args = PagingArguments::parse(&RawPagingArguments::new().first(0), &opts)
        .expect("zero first should parse");
    assert_eq!(args.first(), Some(0));

    let args = PagingArguments::parse(&RawPagingArguments::new().first(2), &opts)
        .expect("first equal to max should parse");
    assert_eq!(args.first(), Some(2));
}

#[test]
fn parse_checks_page_size_before_cursor_format() {
    let raw = RawPagingArguments::new().first(9).after("garbage");
    let err = PagingArguments::parse(&raw, &options(None, Some(2)))
        .expect_err("page size is validated before cursors");

    assert!(matches!(
        err,
        PagingValidationError::PageSizeExceeded { .. }
    ));
}

#[test]
fn parse_rejects_malformed_cursors_with_argument_name() {
    let raw = RawPagingArguments::new().first(1).after("");
    let err = PagingArguments::parse(&raw, &PagingOptions::unbounded())
        .expect_err("empty after cursor must be rejected");
    assert_eq!(
        err,
        PagingValidationError::InvalidCursor {
            argument: PagingArgument::After,
            reason: CursorDecodeError::Empty,
        }
    );

    let raw = RawPagingArguments::new().last(1).before("%%%%");
    let err = PagingArguments::parse(&raw, &PagingOptions::unbounded())
        .expect_err("malformed before cursor must be rejected");
    assert!(matches!(
        err,
        PagingValidationError::InvalidCursor {
            argument: PagingArgument::Before,
            reason: CursorDecodeError::InvalidBase64 { .. },
        }
    ));
}

#[test]
fn raw_arguments_deserialize_from_connection_shape() {
    let raw: RawPagingArguments = serde_json::from_str(r#"{"first": 2, "after": "MQ=="}"#)
        .expect("raw arguments should deserialize");

    assert_eq!(raw, RawPagingArguments::new().first(2).after("MQ=="));
}

#[test]
fn validation_error_kinds_are_stable() {
    assert_eq!(
        PagingValidationError::BackwardPaginationDisabled.kind(),
        "backward_pagination_disabled"
    );
    assert_eq!(
        PagingValidationError::NegativeCount {
            argument: PagingArgument::First,
            value: -1
        }
        .to_string(),
        "'first' must not be negative, found -1"
    );
}
