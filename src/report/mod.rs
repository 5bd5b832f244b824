/// Renders verdicts, side-effect predictions and drug listings as Markdown or
/// JSON.
pub mod formatter;

pub use formatter::{
    format_drug_list, format_side_effects_as_json, format_side_effects_as_markdown,
    format_verdict_as_json, format_verdict_as_markdown, format_verdicts_as_json,
    format_verdicts_as_markdown,
};
