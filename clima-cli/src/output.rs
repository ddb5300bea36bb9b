use clima_core::{ViewState, WeatherReport};

/// The result card: city, temperature, condition, icon URL.
pub fn format_report(report: &WeatherReport) -> String {
    format!(
        "{}\n{}°C  {}\nicon: {}",
        report.location_name,
        report.temperature_c,
        report.condition_text,
        report.condition_icon_url,
    )
}

/// Render the latest view state to the terminal: either the result card,
/// the error banner with its retry hint, or a neutral notice when a silent
/// abort left nothing to show.
pub fn render(state: &ViewState) {
    if let Some(report) = state.result() {
        println!("{}", format_report(report));
    } else if let Some(message) = state.error_message() {
        eprintln!("{message}");
        eprintln!("Run the lookup again to retry.");
    } else {
        println!("No weather to show.");
    }
}
