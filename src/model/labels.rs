//! Raw classifier label to display name

/// Map a raw ticket-type label to the category shown to users
///
/// Unknown labels pass through unchanged.
pub fn map_prediction(raw_label: &str) -> String {
    match raw_label {
        "Incident" => "Technical Support",
        "Problem" => "Billing Issues",
        "Request" | "Change" => "Account Management",
        other => other,
    }
    .to_string()
}
