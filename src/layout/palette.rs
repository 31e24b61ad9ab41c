//! Fixed colors and legends

use crate::catalog::{HealthStatus, ImportanceLevel};

pub fn health_color(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "#52c41a",
        HealthStatus::Warning => "#faad14",
        HealthStatus::Critical => "#f5222d",
        HealthStatus::Unknown => "#d9d9d9",
    }
}

/// Row legend of the matrix, top to bottom
pub fn importance_legend() -> Vec<(ImportanceLevel, &'static str)> {
    ImportanceLevel::ALL
        .iter()
        .map(|&level| {
            let label = match level {
                ImportanceLevel::Critical => "Core",
                ImportanceLevel::High => "Important",
                ImportanceLevel::Medium => "General",
                ImportanceLevel::Low => "Auxiliary",
            };
            (level, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_total_and_distinct() {
        let mut colors: Vec<&str> = HealthStatus::ALL.iter().map(|&s| health_color(s)).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn test_legend_order() {
        let legend = importance_legend();
        assert_eq!(legend[0].0, ImportanceLevel::Critical);
        assert_eq!(legend[3].0, ImportanceLevel::Low);
    }
}
