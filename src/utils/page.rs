//! Standalone HTML page around a chart.
//!
//! The page owns what the chart leaves to its host: dimming the bubbles
//! that are not hovered and positioning the tooltip.

use crate::config::ThemeConfig;
use crate::utils::xml::{
    create_xml_writer, into_string, write_empty_elem, write_end, write_start,
    write_text_element,
};
use anyhow::Result;
use quick_xml::events::{BytesText, Event};
use std::io::Write;

/// Pointer handlers referenced by the chart's leaves.
const CHART_SCRIPT: &str = r"
const tooltip = document.querySelector('.ChartTooltip');
const nodes = () => document.querySelectorAll('.CirclePackingNode');

function chartNodeEnter(event) {
  const target = event.currentTarget;
  nodes().forEach((node) => {
    node.classList.toggle('CirclePackingNode--inactive', node !== target);
  });
  const text = target.dataset.tooltip;
  tooltip.textContent = text || '';
  tooltip.style.display = text ? 'block' : 'none';
  chartNodeMove(event);
}

function chartNodeMove(event) {
  tooltip.style.left = `${event.clientX + 12}px`;
  tooltip.style.top = `${event.clientY + 12}px`;
}

function chartNodeLeave() {
  nodes().forEach((node) => node.classList.remove('CirclePackingNode--inactive'));
  tooltip.style.display = 'none';
}
";

/// What goes around the `<svg>`.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions<'a> {
    pub title: &'a str,
    pub theme: &'a ThemeConfig,
    /// Include the tooltip element and pointer handler script.
    pub interactive: bool,
}

fn stylesheet(theme: &ThemeConfig) -> String {
    let charts = &theme.charts;
    format!(
        "
body {{ margin: 0; padding: 16px; background: {background}; font-family: {font}; }}
.Chart svg {{ overflow: visible; }}
.CirclePackingNode--inactive {{ opacity: 0.15; }}
.ChartTooltip {{ position: fixed; display: none; pointer-events: none; padding: 6px 9px; border-radius: 3px; font-size: 12px; background: {tooltip_background}; color: {tooltip_color}; }}
",
        background = theme.colors.background_alt,
        font = charts.font_family,
        tooltip_background = charts.tooltip_background,
        tooltip_color = charts.tooltip_color,
    )
}

/// Wrap an `<svg>` element into an HTML document.
pub fn wrap_page(svg: &str, options: &PageOptions<'_>) -> Result<String> {
    let mut writer = create_xml_writer(true);
    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    write_start(&mut writer, "html", &[("lang", "en")])?;

    write_start(&mut writer, "head", &[])?;
    write_empty_elem(&mut writer, "meta", &[("charset", "utf-8")])?;
    write_empty_elem(
        &mut writer,
        "meta",
        &[
            ("name", "viewport"),
            ("content", "width=device-width, initial-scale=1"),
        ],
    )?;
    write_text_element(&mut writer, "title", &[], options.title)?;
    write_start(&mut writer, "style", &[])?;
    // Raw text: CSS and JS must not be entity-escaped
    writer.write_event(Event::Text(BytesText::from_escaped(stylesheet(options.theme))))?;
    write_end(&mut writer, "style")?;
    write_end(&mut writer, "head")?;

    write_start(&mut writer, "body", &[])?;
    write_start(&mut writer, "div", &[("class", "Chart")])?;
    writer.get_mut().write_all(svg.as_bytes())?;
    write_end(&mut writer, "div")?;

    if options.interactive {
        write_text_element(&mut writer, "div", &[("class", "ChartTooltip")], "")?;
        write_start(&mut writer, "script", &[])?;
        writer.write_event(Event::Text(BytesText::from_escaped(CHART_SCRIPT)))?;
        write_end(&mut writer, "script")?;
    }

    write_end(&mut writer, "body")?;
    write_end(&mut writer, "html")?;
    into_string(writer)
}
