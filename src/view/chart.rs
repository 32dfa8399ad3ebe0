//! Static policy impact chart shown beside the legislation list

/// One labelled bar dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyChart {
    pub title: &'static str,
    pub dataset_label: &'static str,
    pub labels: &'static [&'static str],
    pub values: &'static [u32],
}

pub const POLICY_IMPACT: PolicyChart = PolicyChart {
    title: "Policy Impact Visualization (Example)",
    dataset_label: "Estimated Positive Impact Score (Policy X)",
    labels: &["Downtown", "Uptown", "Westside", "Eastside", "River North"],
    values: &[75, 60, 85, 70, 55],
};

impl PolicyChart {
    /// Label/value pairs with each value scaled to a bar of at most `width`
    /// cells against the largest value
    #[must_use]
    pub fn bars(&self, width: usize) -> Vec<(&'static str, u32, usize)> {
        let max = self.values.iter().copied().max().unwrap_or(0);
        self.labels
            .iter()
            .zip(self.values)
            .map(|(&label, &value)| {
                let len = if max == 0 {
                    0
                } else {
                    (value as usize * width) / max as usize
                };
                (label, value, len)
            })
            .collect()
    }
}
