//! Per-system topology graph built from the system's own assets

use crate::catalog::{Asset, HealthStatus};
use crate::random::DeterministicSeeded;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Assets beyond this many are left out of the graph
pub const MAX_TOPOLOGY_NODES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyNodeKind {
    Service,
    Middleware,
    Server,
}

impl TopologyNodeKind {
    /// Substring classification of an asset type
    pub fn classify(asset_type: &str) -> Self {
        let t = asset_type.to_ascii_lowercase();
        if t.contains("application") || t.contains("service") {
            TopologyNodeKind::Service
        } else if t.contains("middleware") {
            TopologyNodeKind::Middleware
        } else {
            TopologyNodeKind::Server
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    /// Asset id
    pub id: String,
    pub name: String,
    pub kind: TopologyNodeKind,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyLink {
    pub source: String,
    pub target: String,
    /// Requests per minute
    pub traffic: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyGraph {
    pub nodes: Vec<TopologyNode>,
    pub links: Vec<TopologyLink>,
}

impl TopologyGraph {
    /// Graph over the first [`MAX_TOPOLOGY_NODES`] assets.
    ///
    /// Every even-indexed node links to its successor.
    pub fn from_assets(assets: &[Asset], seeded: DeterministicSeeded) -> Self {
        let nodes: Vec<TopologyNode> = assets
            .iter()
            .take(MAX_TOPOLOGY_NODES)
            .map(|asset| TopologyNode {
                id: asset.id.clone(),
                name: asset.name.clone(),
                kind: TopologyNodeKind::classify(&asset.asset_type),
                status: asset.health_status,
            })
            .collect();

        let links = (0..nodes.len())
            .step_by(2)
            .filter(|&i| i + 1 < nodes.len())
            .map(|i| TopologyLink {
                source: nodes[i].id.clone(),
                target: nodes[i + 1].id.clone(),
                traffic: seeded.int_range(i as u64, 50, 2_000),
            })
            .collect();

        TopologyGraph { nodes, links }
    }

    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Undirected adjacency: node id -> neighbor ids
    pub fn adjacency(&self) -> HashMap<&str, Vec<&str>> {
        let mut adjacency: HashMap<&str, Vec<&str>> =
            self.nodes.iter().map(|n| (n.id.as_str(), Vec::new())).collect();

        for link in &self.links {
            adjacency.entry(link.source.as_str()).or_default().push(link.target.as_str());
            adjacency.entry(link.target.as_str()).or_default().push(link.source.as_str());
        }
        adjacency
    }

    pub fn neighbors(&self, id: &str) -> Vec<&TopologyNode> {
        self.links
            .iter()
            .filter_map(|l| {
                if l.source == id {
                    self.node(&l.target)
                } else if l.target == id {
                    self.node(&l.source)
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ImportanceLevel, MetricCounters};

    fn asset(i: usize, asset_type: &str) -> Asset {
        Asset {
            id: format!("A-{}", i),
            name: format!("asset-{}", i),
            system_id: "SYS-T".to_string(),
            asset_type: asset_type.to_string(),
            health_status: HealthStatus::Healthy,
            importance: ImportanceLevel::High,
            metrics: MetricCounters::default(),
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(TopologyNodeKind::classify("application-service"), TopologyNodeKind::Service);
        assert_eq!(TopologyNodeKind::classify("middleware"), TopologyNodeKind::Middleware);
        assert_eq!(TopologyNodeKind::classify("database"), TopologyNodeKind::Server);
        assert_eq!(TopologyNodeKind::classify("server"), TopologyNodeKind::Server);
    }

    #[test]
    fn test_caps_nodes_and_links_even_pairs() {
        let assets: Vec<Asset> = (0..13).map(|i| asset(i, "server")).collect();
        let graph = TopologyGraph::from_assets(&assets, DeterministicSeeded::new(1));

        assert_eq!(graph.nodes.len(), MAX_TOPOLOGY_NODES);
        assert_eq!(graph.links.len(), 5);
        assert_eq!(graph.links[0].source, "A-0");
        assert_eq!(graph.links[0].target, "A-1");
        assert_eq!(graph.links[4].source, "A-8");
        assert_eq!(graph.links[4].target, "A-9");
    }

    #[test]
    fn test_odd_node_count_leaves_last_unlinked() {
        let assets: Vec<Asset> = (0..5).map(|i| asset(i, "middleware")).collect();
        let graph = TopologyGraph::from_assets(&assets, DeterministicSeeded::new(1));
        assert_eq!(graph.links.len(), 2);
        assert!(graph.neighbors("A-4").is_empty());
        assert_eq!(graph.neighbors("A-3")[0].id, "A-2");
        assert_eq!(graph.adjacency()["A-0"], vec!["A-1"]);
    }

    #[test]
    fn test_empty_assets() {
        let graph = TopologyGraph::from_assets(&[], DeterministicSeeded::new(1));
        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
    }
}
