// src/visual/figures.rs

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use crate::process::CleanedDataset;

const SOURCE_LINK: &str = "<a href=\"https://www.worldometers.info/coronavirus/\">\
                           Worldometer COVID-19 CORONAVIRUS PANDEMIC</a>";

/// Divisor from total cases to marker area.
pub const MARKER_SCALE: f64 = 1000.0;

/// Longitude step between animation frames, in degrees.
pub const ROTATION_STEP: i32 = 2;

/// A Plotly figure: traces, layout, and optional animation frames.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Value>,
}

/// Static world map shaded by total deaths.
pub fn choropleth(ds: &CleanedDataset, as_of: NaiveDate) -> Figure {
    let countries: Vec<&str> = ds.countries().collect();
    let deaths: Vec<Option<f64>> = ds.records.iter().map(|r| r.total_deaths_value()).collect();

    let trace = json!({
        "type": "choropleth",
        "locations": countries,
        "locationmode": "country names",
        "z": deaths,
        "text": countries,
        "colorscale": "Viridis",
        "autocolorscale": false,
        "reversescale": true,
        "marker": { "line": { "color": "darkgray", "width": 0.5 } },
        "colorbar": { "tickprefix": " ", "title": { "text": "Total Deaths" } },
    });

    let layout = json!({
        "title": { "text": format!(
            "Choropleth World Map representing COVID-19 deaths around the world ({})",
            as_of
        ) },
        "geo": {
            "scope": "world",
            "showland": true,
            "showlakes": true,
            "showcountries": true,
            "showocean": true,
            "countrywidth": 0.5,
            "landcolor": "rgb(230, 145, 56)",
            "lakecolor": "rgb(207, 241, 255)",
            "oceancolor": "rgb(187, 235, 255)",
            "projection": { "type": "equirectangular" },
        },
        "annotations": [{
            "x": 0.55,
            "y": 0.15,
            "xref": "paper",
            "yref": "paper",
            "text": format!("Source: {}", SOURCE_LINK),
            "showarrow": false,
        }],
    });

    Figure {
        data: vec![trace],
        layout,
        frames: Vec::new(),
    }
}

/// Orthographic globe of case markers that spins when "Play" is pressed.
pub fn globe(ds: &CleanedDataset, as_of: NaiveDate) -> Figure {
    let countries: Vec<&str> = ds.countries().collect();
    let cases: Vec<Option<f64>> = ds.records.iter().map(|r| r.total_cases_value()).collect();
    let sizes: Vec<f64> = cases
        .iter()
        .map(|c| c.unwrap_or(0.0) / MARKER_SCALE)
        .collect();
    let text: Vec<String> = ds
        .records
        .iter()
        .map(|r| format!("TotalCases: {}", r.total_cases))
        .collect();
    let cmax = cases.iter().flatten().copied().fold(0.0_f64, f64::max);

    let grid = json!({ "showgrid": true, "gridcolor": "rgb(102, 102, 102)", "gridwidth": 0.5 });

    let trace = json!({
        "type": "scattergeo",
        "locationmode": "country names",
        "locations": countries,
        "text": text,
        "marker": {
            "size": sizes,
            "sizemode": "area",
            "opacity": 0.8,
            "reversescale": true,
            "autocolorscale": false,
            "symbol": "circle",
            "line": { "width": 1, "color": "rgb(102, 102, 102)" },
            "colorscale": "Viridis",
            "cmin": 0,
            "color": cases,
            "cmax": cmax,
            "colorbar": { "title": { "text": "Covid19 cases" } },
        },
    });

    let layout = json!({
        "title": {
            "text": format!(
                "Covid 19 cases around the world ({})<br>Source: \
                 <a href=\"https://www.worldometers.info/coronavirus/\">Worldometers</a>",
                as_of
            ),
            "x": 0.5,
        },
        "geo": {
            "projection": { "type": "orthographic", "rotation": { "lon": -180 } },
            "center": { "lon": -180, "lat": 0 },
            "showland": true,
            "showcountries": true,
            "countrycolor": "rgb(204, 204, 204)",
            "scope": "world",
            "showlakes": true,
            "showocean": true,
            "countrywidth": 0.5,
            "lakecolor": "rgb(207, 241, 255)",
            "oceancolor": "rgb(187, 235, 255)",
            "lonaxis": grid,
            "lataxis": grid,
        },
        "updatemenus": [{
            "type": "buttons",
            "showactive": false,
            "y": 1,
            "x": 1.2,
            "xanchor": "right",
            "yanchor": "top",
            "pad": { "t": 0, "r": 10 },
            "buttons": [{
                "label": "Play",
                "method": "animate",
                "args": [null, {
                    "frame": { "duration": 400, "redraw": true },
                    "transition": { "duration": 200 },
                    "fromcurrent": true,
                    "mode": "immediate",
                }],
            }],
        }],
    });

    Figure {
        data: vec![trace],
        layout,
        frames: rotation_frames(),
    }
}

/// One frame per `ROTATION_STEP` degrees of longitude over [-180, 180).
fn rotation_frames() -> Vec<Value> {
    (-180..180)
        .step_by(ROTATION_STEP as usize)
        .map(|lon| {
            json!({
                "layout": {
                    "geo": {
                        "center": { "lon": lon },
                        "projection": { "rotation": { "lon": lon } },
                    },
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::CountryRecord;

    fn record(country: &str, cases: &str, deaths: &str) -> CountryRecord {
        CountryRecord {
            country: country.into(),
            total_cases: cases.into(),
            new_cases: String::new(),
            total_deaths: deaths.into(),
            new_deaths: String::new(),
            total_recovered: String::new(),
            active_cases: String::new(),
            serious_critical: String::new(),
            cases_per_million: String::new(),
            deaths_per_million: String::new(),
        }
    }

    fn dataset() -> CleanedDataset {
        CleanedDataset {
            headers: Vec::new(),
            records: vec![
                record("Albania", "12000", "300"),
                record("Chad", "987", ""),
                record("Zambia", "45000", "1200"),
            ],
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, 12).unwrap()
    }

    #[test]
    fn choropleth_shades_by_deaths() {
        let fig = choropleth(&dataset(), day());
        let trace = &fig.data[0];
        assert_eq!(trace["type"], "choropleth");
        assert_eq!(trace["locations"], json!(["Albania", "Chad", "Zambia"]));
        assert_eq!(trace["z"], json!([300.0, null, 1200.0]));
        assert!(fig.frames.is_empty());
    }

    #[test]
    fn globe_scales_markers_and_rotates() {
        let fig = globe(&dataset(), day());
        let marker = &fig.data[0]["marker"];
        assert_eq!(marker["size"], json!([12.0, 0.987, 45.0]));
        assert_eq!(marker["cmax"], json!(45000.0));
        assert_eq!(fig.data[0]["text"][1], "TotalCases: 987");

        assert_eq!(fig.frames.len(), 180);
        assert_eq!(fig.frames[0]["layout"]["geo"]["center"]["lon"], -180);
        assert_eq!(fig.frames[179]["layout"]["geo"]["center"]["lon"], 178);
    }

    #[test]
    fn frames_are_omitted_from_json_when_static() {
        let value = serde_json::to_value(choropleth(&dataset(), day())).unwrap();
        assert!(value.get("frames").is_none());
    }
}
