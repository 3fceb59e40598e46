//! The relay node catalog.

use lobbysync_protocol::{Node, NodeId, PingStats};

/// A relay node plus our own ping measurements to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEntry {
    pub node: Node,
    /// `None` until the first ping result arrives.
    pub ping: Option<PingStats>,
}

/// Every relay node the server told us about, in the order it listed them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeCatalog {
    entries: Vec<NodeEntry>,
}

impl NodeCatalog {
    /// Replaces the node list.
    ///
    /// Ping stats survive for nodes that are still listed; the server's
    /// list doesn't carry them and re-measuring takes a while.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        let entries = nodes
            .into_iter()
            .map(|node| {
                let ping = self.get(node.node_id()).and_then(|e| e.ping);
                NodeEntry { node, ping }
            })
            .collect();
        self.entries = entries;
        tracing::debug!(count = self.entries.len(), "node list replaced");
    }

    /// Records a ping result for one node. `None` means the node stopped
    /// answering.
    pub fn update_ping(&mut self, node_id: NodeId, ping: Option<PingStats>) {
        match self.entries.iter_mut().find(|e| e.node.node_id() == node_id) {
            Some(entry) => entry.ping = ping,
            None => {
                tracing::debug!(%node_id, "ping update for unlisted node");
            }
        }
    }

    pub fn get(&self, node_id: NodeId) -> Option<&NodeEntry> {
        self.entries.iter().find(|e| e.node.node_id() == node_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i32, name: &str) -> Node {
        Node {
            id,
            name: name.to_owned(),
            ..Node::default()
        }
    }

    fn stats(current: u32) -> PingStats {
        PingStats {
            min: current,
            max: current,
            avg: current,
            current: Some(current),
        }
    }

    #[test]
    fn test_set_nodes_keeps_ping_for_relisted_nodes() {
        let mut catalog = NodeCatalog::default();
        catalog.set_nodes(vec![node(1, "a"), node(2, "b")]);
        catalog.update_ping(NodeId(1), Some(stats(30)));

        catalog.set_nodes(vec![node(1, "a-renamed"), node(3, "c")]);

        assert_eq!(catalog.len(), 2);
        let first = catalog.get(NodeId(1)).unwrap();
        assert_eq!(first.node.name, "a-renamed");
        assert_eq!(first.ping, Some(stats(30)));
        assert!(catalog.get(NodeId(2)).is_none());
        assert_eq!(catalog.get(NodeId(3)).unwrap().ping, None);
    }

    #[test]
    fn test_update_ping_for_unknown_node_is_noop() {
        let mut catalog = NodeCatalog::default();
        catalog.set_nodes(vec![node(1, "a")]);
        let before = catalog.clone();

        catalog.update_ping(NodeId(9), Some(stats(10)));

        assert_eq!(catalog, before);
    }

    #[test]
    fn test_update_ping_none_clears_stats() {
        let mut catalog = NodeCatalog::default();
        catalog.set_nodes(vec![node(1, "a")]);
        catalog.update_ping(NodeId(1), Some(stats(10)));

        catalog.update_ping(NodeId(1), None);

        assert_eq!(catalog.get(NodeId(1)).unwrap().ping, None);
    }
}
