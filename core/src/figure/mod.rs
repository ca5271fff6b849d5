//! Scatter figure rendering.
//!
//! [`render_figure`] turns a [`ChunkTable`] and the current [`Selection`] into a
//! [`FigureSpec`] that serializes to the plotly.js `{data, layout}` shape.

pub mod palette;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::chunk::{ChunkTable, DocumentInfo, Selection};

const FIGURE_TITLE: &str = "Documents in Topic Space (PCA)";
const BORDER_COLOR: &str = "darkslategray";

/// How a label group is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    Highlighted,
    Dimmed,
}

impl VisualState {
    pub fn for_label(selection: &Selection, label: &str) -> Self {
        if selection.contains(label) {
            Self::Highlighted
        } else {
            Self::Dimmed
        }
    }

    pub fn opacity(self) -> f64 {
        match self {
            Self::Highlighted => 0.8,
            Self::Dimmed => 0.2,
        }
    }

    pub fn size(self) -> u32 {
        match self {
            Self::Highlighted => 10,
            Self::Dimmed => 6,
        }
    }

    pub fn border_width(self) -> u32 {
        match self {
            Self::Highlighted => 2,
            Self::Dimmed => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl FigureSpec {
    pub fn point_count(&self) -> usize {
        self.data.iter().map(|t| t.x.len()).sum()
    }

    pub fn trace(&self, label: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name == label)
    }
}

/// One label group as a plotly scatter trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Chunk indices, in the same order as `x` and `y`.
    pub customdata: Vec<usize>,
    pub marker: Marker,
    pub hovertemplate: String,
    #[serde(skip)]
    pub state: VisualState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: &'static str,
    pub size: u32,
    pub opacity: f64,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub width: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub hovermode: &'static str,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: &'static str,
    pub yanchor: &'static str,
    pub y: f64,
    pub xanchor: &'static str,
    pub x: f64,
}

impl Default for Layout {
    fn default() -> Self {
        let title = |text: &str| Title {
            text: text.to_string(),
        };
        Self {
            title: title(FIGURE_TITLE),
            xaxis: Axis { title: title("PC1") },
            yaxis: Axis { title: title("PC2") },
            hovermode: "closest",
            legend: Legend {
                orientation: "h",
                yanchor: "top",
                y: -0.1,
                xanchor: "center",
                x: 0.5,
            },
        }
    }
}

/// Renders one trace per label, in sorted label order.
pub fn render_figure(table: &ChunkTable, selection: &Selection) -> FigureSpec {
    render_figure_with_info(table, selection, &BTreeMap::new())
}

/// Like [`render_figure`], using document titles from `info` in hover text.
pub fn render_figure_with_info(
    table: &ChunkTable,
    selection: &Selection,
    info: &BTreeMap<String, DocumentInfo>,
) -> FigureSpec {
    let data = table
        .groups()
        .map(|group| {
            let state = VisualState::for_label(selection, group.label);
            let display = DocumentInfo::display_name(info.get(group.label), group.label);
            Trace {
                kind: "scatter",
                mode: "markers",
                name: group.label.to_string(),
                x: group.chunks.iter().map(|c| c.coords[0]).collect(),
                y: group.chunks.iter().map(|c| c.coords[1]).collect(),
                customdata: group.chunks.iter().map(|c| c.index).collect(),
                marker: Marker {
                    color: palette::color_for_rank(group.rank),
                    size: state.size(),
                    opacity: state.opacity(),
                    line: MarkerLine {
                        width: state.border_width(),
                        color: BORDER_COLOR,
                    },
                },
                hovertemplate: format!(
                    "<b>{display}</b><br>PC1: %{{x:.3f}}<br>PC2: %{{y:.3f}}<br><extra></extra>"
                ),
                state,
            }
        })
        .collect();

    FigureSpec {
        data,
        layout: Layout::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn table(labels: &[&str]) -> ChunkTable {
        let coords = ndarray::Array2::from_shape_fn((labels.len(), 2), |(i, j)| {
            (i * 2 + j) as f64
        });
        ChunkTable::new(labels.iter().map(|s| s.to_string()).collect(), &coords).unwrap()
    }

    #[test]
    fn test_four_chunks_three_groups() {
        let table = table(&["a", "a", "b", "c"]);
        let figure = render_figure(&table, &Selection::from_iter(["b"]));

        let names = figure.data.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(figure.point_count(), 4);

        let b = figure.trace("b").unwrap();
        assert_eq!(b.state, VisualState::Highlighted);
        assert_eq!(b.marker.opacity, 0.8);
        assert_eq!(b.marker.size, 10);
        assert_eq!(b.marker.line.width, 2);

        for label in ["a", "c"] {
            let trace = figure.trace(label).unwrap();
            assert_eq!(trace.state, VisualState::Dimmed);
            assert_eq!(trace.marker.opacity, 0.2);
            assert_eq!(trace.marker.size, 6);
            assert_eq!(trace.marker.line.width, 0);
        }
        assert_eq!(figure.trace("a").unwrap().customdata, vec![0, 1]);
    }

    #[test]
    fn test_empty_selection_dims_everything() {
        let table = table(&["x", "y", "y"]);
        let figure = render_figure(&table, &Selection::empty());
        assert_eq!(figure.data.len(), 2);
        assert!(figure.data.iter().all(|t| t.state == VisualState::Dimmed));
    }

    #[test]
    fn test_unknown_labels_match_nothing() {
        let table = table(&["x", "y", "y"]);
        let empty = render_figure(&table, &Selection::empty());
        let unknown = render_figure(&table, &Selection::from_iter(["nope", "zzz"]));
        assert_eq!(empty, unknown);
    }

    #[test]
    fn test_colors_follow_label_rank() {
        let labels = (0..14).map(|i| format!("doc{i:02}")).collect::<Vec<_>>();
        let refs = labels.iter().map(String::as_str).collect::<Vec<_>>();
        let figure = render_figure(&table(&refs), &Selection::empty());
        assert_eq!(figure.data[0].marker.color, palette::SET3[0]);
        assert_eq!(figure.data[12].marker.color, palette::SET3[0]);
        assert_eq!(figure.data[13].marker.color, palette::SET3[1]);
    }

    #[test]
    fn test_hover_uses_document_title() {
        let coords = array![[0.0, 0.0]];
        let table = ChunkTable::new(vec!["jemima".to_string()], &coords).unwrap();
        let info = BTreeMap::from([(
            "jemima".to_string(),
            DocumentInfo {
                title: Some("The Tale of Jemima Puddle-Duck".to_string()),
            },
        )]);
        let figure = render_figure_with_info(&table, &Selection::empty(), &info);
        assert_eq!(
            figure.data[0].hovertemplate,
            "<b>The Tale of Jemima Puddle-Duck (jemima)</b><br>PC1: %{x:.3f}<br>PC2: %{y:.3f}<br><extra></extra>"
        );
        assert_eq!(figure.data[0].name, "jemima");
    }

    #[test]
    fn test_serializes_to_plotly_shape() {
        let table = table(&["a"]);
        let value = serde_json::to_value(render_figure(&table, &Selection::from_iter(["a"]))).unwrap();

        let trace = &value["data"][0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["mode"], "markers");
        assert_eq!(trace["marker"]["line"]["color"], "darkslategray");
        assert!(trace.get("state").is_none());
        assert_eq!(value["layout"]["title"]["text"], "Documents in Topic Space (PCA)");
        assert_eq!(value["layout"]["xaxis"]["title"]["text"], "PC1");
        assert_eq!(value["layout"]["legend"]["orientation"], "h");
        assert_eq!(value["layout"]["hovermode"], "closest");
    }
}
