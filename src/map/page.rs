use crate::errors::AppError;
use crate::map::MapCenter;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub const INITIAL_ZOOM: u8 = 12;

const PAGE_STYLE: &str = "html, body { height: 100%; margin: 0; } #map { position: absolute; inset: 0; }";

#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
}

/// The first entry is the layer shown on load.
pub const TILE_LAYERS: &[TileLayer] = &[
    TileLayer {
        name: "OpenStreetMap",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "OpenStreetMap",
    },
    TileLayer {
        name: "Google Satélite",
        url: "https://mt1.google.com/vt/lyrs=y&x={x}&y={y}&z={z}",
        attribution: "Google",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct MarkerVm {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
    pub tooltip: String,
}

pub struct MapPageVm<'a> {
    pub title: &'a str,
    pub center: MapCenter,
    pub zoom: u8,
    pub markers: &'a [MarkerVm],
    pub generated_at: String,
}

pub fn map_page(vm: &MapPageVm<'_>) -> Result<Markup, AppError> {
    let script = map_script(vm)?;

    Ok(html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="generator" content=(format!("listings-map {}", vm.generated_at));
                title { (vm.title) }
                link rel="stylesheet" href=(LEAFLET_CSS);
                script src=(LEAFLET_JS) {}
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div id="map" {}
                script { (PreEscaped(script)) }
            }
        }
    })
}

fn map_script(vm: &MapPageVm<'_>) -> Result<String, AppError> {
    let center = script_json(&[vm.center.latitude, vm.center.longitude])?;
    let layers = script_json(TILE_LAYERS)?;
    let markers = script_json(vm.markers)?;

    Ok(format!(
        r#"
const map = L.map("map", {{ center: {center}, zoom: {zoom} }});
const baseLayers = {{}};
{layers}.forEach(function (layer, i) {{
    const tiles = L.tileLayer(layer.url, {{ attribution: layer.attribution }});
    baseLayers[layer.name] = tiles;
    if (i === 0) {{ tiles.addTo(map); }}
}});
L.control.layers(baseLayers).addTo(map);
{markers}.forEach(function (m) {{
    L.marker([m.lat, m.lon]).bindPopup(m.popup).bindTooltip(m.tooltip).addTo(map);
}});
"#,
        zoom = vm.zoom,
    ))
}

/// JSON safe to inline in a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    let json = serde_json::to_string(value).map_err(|e| AppError::Render(e.to_string()))?;
    Ok(json.replace("</", "<\\/"))
}
