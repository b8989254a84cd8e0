//! SVG serialization of rendered nodes.
//!
//! ```text
//! <svg class="CirclePackingChart" style="overflow: visible">
//!   <g transform="translate(margin,margin)">
//!     <g> section: defs/path, text/textPath, dashed circle </g>
//!     <g class="CirclePackingNode"> leaf: title, outer, inner, label </g>
//!   </g>
//! </svg>
//! ```

use super::render::{LeafBubble, NodeVisual, SectionRing};
use super::tooltip::Tooltip;
use crate::utils::slug::sanitize_fragment;
use crate::utils::xml::{
    XmlWriter, create_xml_writer, fmt_num, into_string, write_empty_elem, write_end,
    write_start, write_text_element,
};
use anyhow::Result;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Outer geometry of the chart document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    /// Offset of the drawing area on every side.
    pub margin: f64,
}

/// A node ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    pub visual: NodeVisual,
    pub tooltip: Option<Tooltip>,
}

/// Serialize nodes, in order, into a standalone `<svg>` element.
pub fn write_chart(frame: &ChartFrame, nodes: &[RenderedNode], compact: bool) -> Result<String> {
    let mut writer = create_xml_writer(compact);
    let width = fmt_num(frame.width);
    let height = fmt_num(frame.height);
    let view_box = format!("0 0 {width} {height}");
    let offset = fmt_num(frame.margin);

    write_start(
        &mut writer,
        "svg",
        &[
            ("xmlns", SVG_NS),
            ("xmlns:xlink", XLINK_NS),
            ("width", &width),
            ("height", &height),
            ("viewBox", &view_box),
            ("class", "CirclePackingChart"),
            ("style", "overflow: visible"),
        ],
    )?;
    write_start(
        &mut writer,
        "g",
        &[("transform", &format!("translate({offset},{offset})"))],
    )?;

    for node in nodes {
        match &node.visual {
            NodeVisual::Hidden => {}
            NodeVisual::Section(ring) => write_section(&mut writer, ring)?,
            NodeVisual::Leaf(bubble) => write_leaf(&mut writer, bubble, node.tooltip.as_ref())?,
        }
    }

    write_end(&mut writer, "g")?;
    write_end(&mut writer, "svg")?;
    into_string(writer)
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", fmt_num(x), fmt_num(y))
}

/// Closed circle path starting at the left edge, used for curved labels.
fn circle_path(r: f64) -> String {
    let r1 = fmt_num(r);
    let d = fmt_num(r * 2.0);
    format!("M-{r1},0a{r1},{r1} 0 1,0 {d},0a{r1},{r1} 0 1,0 -{d},0")
}

fn write_section(writer: &mut XmlWriter, ring: &SectionRing) -> Result<()> {
    let path_id = format!("textcircle-{}", sanitize_fragment(&ring.section));
    let href = format!("#{path_id}");
    let offset = ring.label_offset.to_string();

    write_start(writer, "g", &[("transform", &translate(ring.x, ring.y))])?;

    write_start(writer, "defs", &[])?;
    write_empty_elem(writer, "path", &[("d", &circle_path(ring.r)), ("id", &path_id)])?;
    write_end(writer, "defs")?;

    write_start(
        writer,
        "text",
        &[("dy", "30"), ("fill", &ring.label_fill), ("opacity", "0.65")],
    )?;
    write_text_element(
        writer,
        "textPath",
        &[
            ("href", &href),
            ("xlink:href", &href),
            ("side", "right"),
            ("fill", &ring.color),
            ("startOffset", &offset),
            ("font-weight", "600"),
            ("font-size", "0.9rem"),
        ],
        &ring.label,
    )?;
    write_end(writer, "text")?;

    write_empty_elem(
        writer,
        "circle",
        &[
            ("r", &fmt_num(ring.r)),
            ("fill", &ring.background),
            ("fill-opacity", "0.4"),
            ("stroke", &ring.color),
            ("stroke-width", "1"),
            ("stroke-linecap", "round"),
            ("stroke-dasharray", "2 3"),
        ],
    )?;

    write_end(writer, "g")
}

fn write_leaf(writer: &mut XmlWriter, bubble: &LeafBubble, tooltip: Option<&Tooltip>) -> Result<()> {
    let transform = translate(bubble.x, bubble.y);
    let tooltip_text = tooltip.map(Tooltip::to_string);

    let mut attrs = vec![("class", "CirclePackingNode"), ("transform", transform.as_str())];
    if let Some(text) = &tooltip_text {
        attrs.push(("data-tooltip", text.as_str()));
    }
    attrs.extend(bubble.handlers.attributes());
    write_start(writer, "g", &attrs)?;

    if let Some(text) = &tooltip_text {
        write_text_element(writer, "title", &[], text)?;
    }

    let outer_r = fmt_num(bubble.r);
    let outer_opacity = bubble.outer_fill.opacity.map(fmt_num);
    let mut outer = vec![("r", outer_r.as_str()), ("fill", bubble.outer_fill.color.as_str())];
    if let Some(opacity) = &outer_opacity {
        outer.push(("fill-opacity", opacity.as_str()));
    }
    write_empty_elem(writer, "circle", &outer)?;
    write_empty_elem(
        writer,
        "circle",
        &[("r", &fmt_num(bubble.inner_r)), ("fill", &bubble.inner_fill)],
    )?;

    write_label(writer, bubble)?;
    write_end(writer, "g")
}

/// Centred leaf label.
fn write_label(writer: &mut XmlWriter, bubble: &LeafBubble) -> Result<()> {
    write_text_element(
        writer,
        "text",
        &[
            ("text-anchor", "middle"),
            ("dominant-baseline", "central"),
            ("font-family", &bubble.font_family),
            ("font-size", &bubble.font_size.to_string()),
            ("fill", &bubble.label_color),
        ],
        &bubble.label,
    )
}
