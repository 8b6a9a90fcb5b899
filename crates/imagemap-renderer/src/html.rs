//! HTML and script serialization of a validated [`Document`].
//!
//! # Output Structure
//!
//! ```html
//! <script src="…jquery.min.js"></script>
//! <script src="…jquery.imagemapster.min.js"></script>
//! <img id="picpng" src="pic.png" width=300 usemap="#picpng">
//! <map name="picpng">
//!   <area shape="rect" coords="0,0,10,10" target="zoneA" href="#" />
//! </map>
//! <div style="…" id="picpng_description"></div>
//! <script type="text/javascript">
//! (function ($) {
//! var default_description = '…';
//! var tooltip_map = { zoneA: 'Zone A', };
//! var description_map = { zoneA: '<p>Hello</p>', };
//! $('#picpng').mapster({ … });
//! })(jQuery);
//! </script>
//! ```
//!
//! The script is wrapped in a function so several maps can share a page.

use crate::model::Document;
use crate::util::{escape_html, escape_js_string, js_key};

/// Default DOM-query library.
pub const DEFAULT_JQUERY_URL: &str = "https://cdn.jsdelivr.net/jquery/1.11.1/jquery.min.js";

/// Default image map interaction library.
pub const DEFAULT_MAPSTER_URL: &str =
    "https://andreasbihlmaier.github.io/js/jquery.imagemapster.min.js";

/// Default text of the description panel.
pub const DEFAULT_DESCRIPTION: &str =
    "Explore image by mouseover. Click on highlighted part in order to get more information.";

/// Highlight style of selected areas.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightStyle {
    /// Fill opacity (0.0 to 1.0).
    pub fill_opacity: f64,
    /// Fill colour as six hex digits.
    pub fill_color: String,
    /// Whether to draw an outline.
    pub stroke: bool,
    /// Outline colour as six hex digits.
    pub stroke_color: String,
    /// Outline opacity (0.0 to 1.0).
    pub stroke_opacity: f64,
    /// Outline width in pixels.
    pub stroke_width: u32,
    /// Whether selecting an area deselects the others.
    pub single_select: bool,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            fill_opacity: 0.2,
            fill_color: "00ff00".to_owned(),
            stroke: true,
            stroke_color: "000000".to_owned(),
            stroke_opacity: 0.8,
            stroke_width: 4,
            single_select: true,
        }
    }
}

/// Fixed parts of the output template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateOptions {
    /// URL of the DOM-query library script.
    pub jquery_url: String,
    /// URL of the image map library script.
    pub mapster_url: String,
    /// Plain text shown while no area is selected.
    pub default_description: String,
    /// Height of the description panel in pixels.
    pub panel_height: u32,
    /// Highlight style.
    pub highlight: HighlightStyle,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            jquery_url: DEFAULT_JQUERY_URL.to_owned(),
            mapster_url: DEFAULT_MAPSTER_URL.to_owned(),
            default_description: DEFAULT_DESCRIPTION.to_owned(),
            panel_height: 200,
            highlight: HighlightStyle::default(),
        }
    }
}

/// Serialize a document into the final HTML fragment.
///
/// Area descriptions must already be rendered.
#[must_use]
pub fn render_document(doc: &Document, options: &TemplateOptions) -> String {
    let image = &doc.image;
    let panel_id = format!("{}_description", image.id);
    let mut out = String::with_capacity(2048 + doc.len() * 256);

    out.push_str(&format!(
        "<script src=\"{}\"></script>\n<script src=\"{}\"></script>\n",
        escape_html(&options.jquery_url),
        escape_html(&options.mapster_url)
    ));

    out.push_str(&format!(
        r##"<img id="{id}" src="{src}" width={width} usemap="#{id}">"##,
        id = image.id,
        src = image.src,
        width = image.width
    ));
    out.push_str(&format!(r#"<map name="{}">"#, image.id));
    for area in doc.areas.values() {
        out.push_str(&format!(
            r##"<area shape="{}" coords="{}" target="{}" href="#" />"##,
            area.shape, area.coords, area.name
        ));
    }
    out.push_str("</map>\n");

    out.push_str(&format!(
        "<div style=\"text-align: left; clear: both; width: {}px; height: {}px; border: 1px solid black;\" id=\"{panel_id}\"></div>\n",
        image.width, options.panel_height
    ));

    out.push_str(&render_script(doc, options, &panel_id));
    out
}

fn render_script(doc: &Document, options: &TemplateOptions, panel_id: &str) -> String {
    let mut tooltip_map = String::new();
    let mut description_map = String::new();
    let mut areas = String::new();
    for area in doc.areas.values() {
        let key = js_key(&area.name);
        let name = escape_js_string(&area.name);
        tooltip_map.push_str(&format!(
            "  {key}: '{}',\n",
            escape_js_string(&area.tooltip)
        ));
        description_map.push_str(&format!(
            "  {key}: '{}',\n",
            escape_js_string(&area.description)
        ));
        areas.push_str(&format!(
            "    {{key: '{name}', toolTip: tooltip_map['{name}']}},\n"
        ));
    }

    let style = &options.highlight;
    format!(
        r#"<script type="text/javascript">
(function ($) {{
var default_description = '{default_description}';
var panel = $('#{panel_id}');
panel.html(default_description);

var tooltip_map = {{
{tooltip_map}}};
var description_map = {{
{description_map}}};

$('#{image_id}').mapster({{
  fillOpacity: {fill_opacity},
  fillColor: "{fill_color}",
  stroke: {stroke},
  strokeColor: "{stroke_color}",
  strokeOpacity: {stroke_opacity},
  strokeWidth: {stroke_width},
  singleSelect: {single_select},
  mapKey: 'target',
  listKey: 'target',
  onClick: function (e) {{
    if (!e.selected) {{
      panel.html(default_description);
    }} else {{
      panel.html(description_map[e.key]);
    }}
  }},
  showToolTip: true,
  areas: [
{areas}    ]
}});
}})(jQuery);
</script>
"#,
        default_description = escape_js_string(&escape_html(&options.default_description)),
        image_id = doc.image.id,
        fill_opacity = style.fill_opacity,
        fill_color = escape_js_string(&style.fill_color),
        stroke = style.stroke,
        stroke_color = escape_js_string(&style.stroke_color),
        stroke_opacity = style.stroke_opacity,
        stroke_width = style.stroke_width,
        single_select = style.single_select,
    )
}
