//! Dual-axis price/volume figure.
//!
//! Serialises to the `{data, layout}` shape Plotly expects, so the browser
//! only has to hand it to `Plotly.newPlot`.

use crate::domain::series::PriceSeries;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter {
        x: Vec<String>,
        y: Vec<f64>,
        mode: &'static str,
        name: &'static str,
        yaxis: &'static str,
    },
    Bar {
        x: Vec<String>,
        y: Vec<u64>,
        name: &'static str,
        yaxis: &'static str,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub autosize: bool,
    pub height: u32,
    pub width: u32,
    pub margin: Margin,
    pub legend: Legend,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
    pub yaxis2: YAxis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    pub pad: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct XAxis {
    pub title: Title,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub rangeslider: RangeSlider,
    pub rangeselector: RangeSelector,
}

#[derive(Debug, Clone, Serialize)]
pub struct YAxis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSelector {
    pub buttons: Vec<RangeButton>,
}

/// One preset zoom window. `step = "all"` resets to the full range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub step: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepmode: Option<&'static str>,
}

impl RangeButton {
    fn backward(count: u32, label: &'static str, step: &'static str) -> Self {
        Self {
            count: Some(count),
            label: Some(label),
            step,
            stepmode: Some("backward"),
        }
    }

    fn all() -> Self {
        Self {
            count: None,
            label: None,
            step: "all",
            stepmode: None,
        }
    }
}

/// 1w, 1m, 6m, 1y, all.
pub fn preset_windows() -> Vec<RangeButton> {
    vec![
        RangeButton::backward(7, "1w", "day"),
        RangeButton::backward(1, "1m", "month"),
        RangeButton::backward(6, "6m", "month"),
        RangeButton::backward(1, "1y", "year"),
        RangeButton::all(),
    ]
}

impl Figure {
    /// Close as a line on the primary axis, volume as bars on the secondary.
    pub fn price_volume(series: &PriceSeries, currency: &str) -> Self {
        let dates: Vec<String> = series
            .points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect();
        let closes = series.points.iter().map(|p| p.close).collect();
        let volumes = series.points.iter().map(|p| p.volume).collect();

        Self {
            data: vec![
                Trace::Scatter {
                    x: dates.clone(),
                    y: closes,
                    mode: "lines",
                    name: "Stock Price",
                    yaxis: "y",
                },
                Trace::Bar {
                    x: dates,
                    y: volumes,
                    name: "Volume Traded",
                    yaxis: "y2",
                },
            ],
            layout: Layout {
                autosize: false,
                height: 380,
                width: 1400,
                margin: Margin {
                    l: 80,
                    r: 0,
                    b: 0,
                    t: 50,
                    pad: 0,
                },
                legend: Legend { x: 0.8, y: 1.3 },
                xaxis: XAxis {
                    title: Title {
                        text: "Date".into(),
                    },
                    kind: "date",
                    rangeslider: RangeSlider { visible: true },
                    rangeselector: RangeSelector {
                        buttons: preset_windows(),
                    },
                },
                yaxis: YAxis {
                    title: Title {
                        text: format!("Price ({currency})"),
                    },
                    overlaying: None,
                    side: None,
                },
                yaxis2: YAxis {
                    title: Title {
                        text: "Volume traded".into(),
                    },
                    overlaying: Some("y"),
                    side: Some("right"),
                },
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
