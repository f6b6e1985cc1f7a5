/// Page renderer for the traceprop studio.
///
/// A single compile-time HTML template (`studio/assets/studio.html`) with
/// `{{TOKEN}}` placeholders. Global placeholders (config fields, flash
/// banner) are resolved here; anything a handler does not fill is blanked so
/// raw tokens never leak to the browser.
use traceprop::{Activation, EngineConfig};

use crate::state::{FlashKind, FlashMessage};

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Renders the studio page for the current configuration.
pub fn render_page(config: &EngineConfig, flash: Option<FlashMessage>, has_playback: bool) -> String {
    let mut html = TEMPLATE.to_owned();

    html = html.replace("{{INPUT_SIZE}}", &config.input_size.to_string());
    html = html.replace("{{HIDDEN_LAYERS}}", &config.hidden_layers.to_string());
    html = html.replace("{{NEURONS_PER_LAYER}}", &config.neurons_per_layer.to_string());
    html = html.replace("{{LEARNING_RATE}}", &config.learning_rate.to_string());
    html = html.replace("{{HAS_PLAYBACK}}", if has_playback { "true" } else { "false" });

    for (token, variant) in [
        ("{{SEL_SIGMOID}}", Activation::Sigmoid),
        ("{{SEL_RELU}}", Activation::ReLU),
        ("{{SEL_TANH}}", Activation::Tanh),
    ] {
        let selected = if config.activation == variant { "selected" } else { "" };
        html = html.replace(token, selected);
    }

    let flash_html = match flash {
        Some(FlashMessage { kind: FlashKind::Success, text }) => {
            format!("<div class=\"flash success\">{}</div>", escape(&text))
        }
        Some(FlashMessage { kind: FlashKind::Error, text }) => {
            format!("<div class=\"flash error\">{}</div>", escape(&text))
        }
        None => String::new(),
    };
    html = html.replace("{{FLASH}}", &flash_html);

    blank_remaining(html)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Replaces any `{{UPPERCASE_TOKEN}}` that wasn't already substituted with an
/// empty string, so a missed token produces a clean page.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}
