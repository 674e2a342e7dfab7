//! Node roles: letter, color and legend label per role.

/// Roles a node can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    DataContent,
    Data,
    DataFrozen,
    DataHot,
    Ingest,
    DataCold,
    Ml,
    Master,
    CoordinatingOnly,
    RemoteClusterClient,
    Transform,
    VotingOnly,
    DataWarm,
}

impl NodeRole {
    /// All roles, ordered by letter.
    pub const ALL: [NodeRole; 13] = [
        NodeRole::DataContent,
        NodeRole::Data,
        NodeRole::DataFrozen,
        NodeRole::DataHot,
        NodeRole::Ingest,
        NodeRole::DataCold,
        NodeRole::Ml,
        NodeRole::Master,
        NodeRole::CoordinatingOnly,
        NodeRole::RemoteClusterClient,
        NodeRole::Transform,
        NodeRole::VotingOnly,
        NodeRole::DataWarm,
    ];

    /// Parses the role name reported by the nodes API.
    pub fn from_name(name: &str) -> Option<Self> {
        let role = match name {
            "master" => NodeRole::Master,
            "data" => NodeRole::Data,
            "data_content" => NodeRole::DataContent,
            "data_hot" => NodeRole::DataHot,
            "data_warm" => NodeRole::DataWarm,
            "data_cold" => NodeRole::DataCold,
            "data_frozen" => NodeRole::DataFrozen,
            "ingest" => NodeRole::Ingest,
            "ml" => NodeRole::Ml,
            "remote_cluster_client" => NodeRole::RemoteClusterClient,
            "transform" => NodeRole::Transform,
            "voting_only" => NodeRole::VotingOnly,
            "coordinating_only" => NodeRole::CoordinatingOnly,
            _ => return None,
        };
        Some(role)
    }

    pub fn letter(self) -> char {
        match self {
            NodeRole::DataContent => 'C',
            NodeRole::Data => 'D',
            NodeRole::DataFrozen => 'F',
            NodeRole::DataHot => 'H',
            NodeRole::Ingest => 'I',
            NodeRole::DataCold => 'K',
            NodeRole::Ml => 'L',
            NodeRole::Master => 'M',
            NodeRole::CoordinatingOnly => 'O',
            NodeRole::RemoteClusterClient => 'R',
            NodeRole::Transform => 'T',
            NodeRole::VotingOnly => 'V',
            NodeRole::DataWarm => 'W',
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            NodeRole::Master => "#ff5555",
            NodeRole::Data => "#50fa7b",
            NodeRole::DataContent => "#8be9fd",
            NodeRole::DataHot => "#ffb86c",
            NodeRole::DataWarm => "#bd93f9",
            NodeRole::DataCold => "#f1fa8c",
            NodeRole::DataFrozen => "#ff79c6",
            NodeRole::Ingest => "#87cefa",
            NodeRole::Ml => "#6272a4",
            NodeRole::RemoteClusterClient => "#dda0dd",
            NodeRole::Transform => "#689d6a",
            NodeRole::VotingOnly => "#458588",
            NodeRole::CoordinatingOnly => "#d65d0e",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeRole::Master => "Master",
            NodeRole::Data => "Data",
            NodeRole::DataContent => "Data Content",
            NodeRole::DataHot => "Data Hot",
            NodeRole::DataWarm => "Data Warm",
            NodeRole::DataCold => "Data Cold",
            NodeRole::DataFrozen => "Data Frozen",
            NodeRole::Ingest => "Ingest",
            NodeRole::Ml => "Machine Learning",
            NodeRole::RemoteClusterClient => "Remote Cluster Client",
            NodeRole::Transform => "Transform",
            NodeRole::VotingOnly => "Voting Only",
            NodeRole::CoordinatingOnly => "Coordinating Only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_by_letter() {
        let letters: Vec<char> = NodeRole::ALL.iter().map(|r| r.letter()).collect();
        let mut sorted = letters.clone();
        sorted.sort();
        assert_eq!(letters, sorted);
        assert_eq!(letters.iter().collect::<String>(), "CDFHIKLMORTVW");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(NodeRole::from_name("data_hot"), Some(NodeRole::DataHot));
        assert_eq!(NodeRole::from_name("ml"), Some(NodeRole::Ml));
        assert_eq!(NodeRole::from_name("unknown"), None);
        for role in NodeRole::ALL {
            assert!(!role.label().is_empty());
            assert!(role.color().starts_with('#'));
        }
    }
}
