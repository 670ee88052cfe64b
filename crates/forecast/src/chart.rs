use serde::{Deserialize, Serialize};

/// Chart-ready bundle: labels plus three parallel series of equal length.
///
/// Missing values are explicit `None`s (serialized as `null`), never zero,
/// so a chart does not plot a false drop between the historical and
/// projected segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBundle {
    pub labels: Vec<String>,
    /// Reconstructed levels; `None` over the projected segment.
    pub history: Vec<Option<f64>>,
    /// Projected levels; `None` over the historical segment.
    pub projection: Vec<Option<f64>>,
    /// Constant reorder threshold across the full width.
    pub threshold: Vec<Option<f64>>,
}

impl ChartBundle {
    /// Total number of points (labels and every series share this length).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Assemble the three-series chart bundle.
///
/// `history_labels` should carry one label per historical point; shortfalls
/// are padded with positional labels rather than truncating the series.
pub fn chart_bundle(
    history: &[i64],
    history_labels: &[String],
    projection: &[f64],
    threshold: i64,
) -> ChartBundle {
    let total = history.len() + projection.len();

    let mut labels = Vec::with_capacity(total);
    for (i, _) in history.iter().enumerate() {
        match history_labels.get(i) {
            Some(l) => labels.push(l.clone()),
            None => labels.push(format!("t{i}")),
        }
    }
    for i in 0..projection.len() {
        labels.push(format!("+{}d", i + 1));
    }

    let history_series = history
        .iter()
        .map(|v| Some(*v as f64))
        .chain(std::iter::repeat_n(None, projection.len()))
        .collect();

    let projection_series = std::iter::repeat_n(None, history.len())
        .chain(projection.iter().map(|v| Some(*v)))
        .collect();

    let threshold_series = std::iter::repeat_n(Some(threshold as f64), total).collect();

    ChartBundle {
        labels,
        history: history_series,
        projection: projection_series,
        threshold: threshold_series,
    }
}
