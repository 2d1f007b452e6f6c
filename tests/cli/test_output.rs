//! Tests for CLI output formatting helpers
//!
//! - Duration formatting (ms, s, m)
//! - Print helpers run without panicking

use paper_rag::cli::output::{format_duration, print_error, print_step, print_success, print_warning};

#[test]
fn test_format_duration_ranges() {
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.25), "250ms");
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.5), "59.50s");
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.0), "2m 5.0s");
}

#[test]
fn test_print_helpers() {
    print_success("done");
    print_warning("careful");
    print_error("failed");
    print_step(1, 4, "Downloading papers...");
}
