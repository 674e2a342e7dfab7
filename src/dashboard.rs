//! Dashboard state and the staged refresh cycle.
//!
//! A refresh walks [`Endpoint::REFRESH_ORDER`] and renders each panel as soon
//! as every endpoint it depends on has been fetched. The first failure stops
//! the cycle: the owning panel shows the error and panels not yet rendered in
//! this cycle keep their previous text.

use std::time::Instant;

use chrono::Local;
use tracing::{debug, info};

use crate::activity::{ActivityTracker, EvictionPolicy};
use crate::client::model::{
    CatIndex, ClusterHealth, ClusterStats, DataStreams, IndexWriteStats, NodeLoad, NodesInfo,
    NodesStats,
};
use crate::client::{Endpoint, FetchError, Payload, SnapshotSource, VersionCache};
use crate::layout::{Geometry, Panel, PanelVisibility, layout};
use crate::markup;
use crate::view;

/// Current text of every panel, as display markup lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelText {
    header: Vec<String>,
    nodes: Vec<String>,
    roles: Vec<String>,
    indices: Vec<String>,
    metrics: Vec<String>,
}

impl PanelText {
    pub fn get(&self, panel: Panel) -> &[String] {
        match panel {
            Panel::Header => &self.header,
            Panel::Nodes => &self.nodes,
            Panel::Roles => &self.roles,
            Panel::Indices => &self.indices,
            Panel::Metrics => &self.metrics,
        }
    }

    pub fn set(&mut self, panel: Panel, lines: Vec<String>) {
        let slot = match panel {
            Panel::Header => &mut self.header,
            Panel::Nodes => &mut self.nodes,
            Panel::Roles => &mut self.roles,
            Panel::Indices => &mut self.indices,
            Panel::Metrics => &mut self.metrics,
        };
        *slot = lines;
    }
}

/// Payloads fetched so far in one refresh cycle.
#[derive(Debug, Default)]
struct CycleData {
    cluster_stats: Option<ClusterStats>,
    nodes_info: Option<NodesInfo>,
    nodes_stats: Option<NodesStats>,
    node_load: Option<Vec<NodeLoad>>,
    health: Option<ClusterHealth>,
    cat_indices: Option<Vec<CatIndex>>,
    index_stats: Option<IndexWriteStats>,
    data_streams: Option<DataStreams>,
    latest: Option<String>,
    rendered: Vec<Panel>,
}

impl CycleData {
    fn store(&mut self, payload: Payload) {
        match payload {
            Payload::ClusterStats(v) => self.cluster_stats = Some(v),
            Payload::NodesInfo(v) => self.nodes_info = Some(v),
            Payload::NodesStats(v) => self.nodes_stats = Some(v),
            Payload::NodeLoad(v) => self.node_load = Some(v),
            Payload::ClusterHealth(v) => self.health = Some(v),
            Payload::CatIndices(v) => self.cat_indices = Some(v),
            Payload::IndexStats(v) => self.index_stats = Some(v),
            Payload::DataStreams(v) => self.data_streams = Some(v),
        }
    }
}

/// Everything the terminal surface draws, plus the state that outlives a cycle.
pub struct Dashboard {
    tracker: ActivityTracker,
    visibility: PanelVisibility,
    geometry: Geometry,
    panels: PanelText,
    versions: VersionCache,
    cycles: u64,
}

impl Dashboard {
    pub fn new(eviction: EvictionPolicy, versions: VersionCache) -> Self {
        let visibility = PanelVisibility::default();
        Self {
            tracker: ActivityTracker::new(eviction),
            geometry: layout(&visibility),
            visibility,
            panels: PanelText::default(),
            versions,
            cycles: 0,
        }
    }

    pub fn panels(&self) -> &PanelText {
        &self.panels
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn visibility(&self) -> &PanelVisibility {
        &self.visibility
    }

    pub fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }

    /// Number of refresh cycles started.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Shows or hides `panel` and recomputes the grid.
    pub fn toggle(&mut self, panel: Panel) {
        if self.visibility.toggle(panel) {
            self.geometry = layout(&self.visibility);
            debug!(?panel, visible = self.visibility.is_visible(panel), "panel toggled");
        }
    }

    /// Flips the hidden-index filter. Applied on the next refresh.
    pub fn toggle_hidden(&mut self) {
        self.visibility.hidden_indices = !self.visibility.hidden_indices;
        debug!(show = self.visibility.hidden_indices, "hidden indices toggled");
    }

    /// Runs one full refresh cycle against `source`.
    ///
    /// Stops at the first failed endpoint and returns its error after writing
    /// it into the owning panel.
    pub fn refresh(&mut self, source: &dyn SnapshotSource, now: Instant) -> Result<(), FetchError> {
        self.cycles += 1;
        let started = Instant::now();
        debug!(cycle = self.cycles, "refresh started");
        let mut cycle = CycleData::default();
        for endpoint in Endpoint::REFRESH_ORDER {
            match source.fetch(endpoint) {
                Ok(payload) => {
                    cycle.store(payload);
                    self.render_ready(&mut cycle, now);
                }
                Err(e) => {
                    let owner = endpoint.owner();
                    let message = markup::escape(&e.to_string());
                    self.panels.set(owner, vec![format!("[red]Error: {}", message)]);
                    info!(
                        cycle = self.cycles,
                        endpoint = endpoint.path(),
                        panel = ?owner,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "refresh aborted"
                    );
                    return Err(e);
                }
            }
        }
        debug!(
            cycle = self.cycles,
            tracked = self.tracker.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "refresh complete"
        );
        Ok(())
    }

    /// Renders every panel whose inputs are all present and which has not
    /// been rendered yet this cycle.
    fn render_ready(&mut self, cycle: &mut CycleData, now: Instant) {
        for panel in [
            Panel::Header,
            Panel::Roles,
            Panel::Metrics,
            Panel::Nodes,
            Panel::Indices,
        ] {
            if cycle.rendered.contains(&panel) {
                continue;
            }
            if let Some(lines) = self.render_panel(panel, cycle, now) {
                self.panels.set(panel, lines);
                cycle.rendered.push(panel);
            }
        }
    }

    fn render_panel(
        &mut self,
        panel: Panel,
        cycle: &mut CycleData,
        now: Instant,
    ) -> Option<Vec<String>> {
        match panel {
            Panel::Header => {
                let stats = cycle.cluster_stats.as_ref()?;
                let latest = self.versions.latest(now);
                let lines = view::header::render(stats, &latest, Local::now());
                cycle.latest = Some(latest);
                Some(lines)
            }
            Panel::Roles => Some(view::legend::render(cycle.nodes_info.as_ref()?)),
            Panel::Metrics => Some(view::metrics::render(
                cycle.cluster_stats.as_ref()?,
                cycle.nodes_info.as_ref()?,
                cycle.nodes_stats.as_ref()?,
            )),
            Panel::Nodes => {
                let rows = view::nodes::build_rows(
                    cycle.nodes_info.as_ref()?,
                    cycle.nodes_stats.as_ref()?,
                    cycle.node_load.as_deref()?,
                    cycle.latest.as_deref().unwrap_or(""),
                );
                Some(view::nodes::render(&rows))
            }
            Panel::Indices => {
                let nodes = cycle.nodes_stats.as_ref()?;
                let health = cycle.health.as_ref()?;
                let cat = cycle.cat_indices.as_deref()?;
                let writes = cycle.index_stats.as_ref()?;
                let streams = cycle.data_streams.as_ref()?;
                let rows = view::indices::build_rows(
                    cat,
                    writes,
                    streams,
                    &mut self.tracker,
                    now,
                    self.visibility.hidden_indices,
                );
                let evicted = self.tracker.end_cycle();
                if evicted > 0 {
                    debug!(evicted, "evicted absent indices");
                }
                Some(view::indices::render(&rows, nodes, health))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ReleaseLookup;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    struct NoRelease;

    impl ReleaseLookup for NoRelease {
        fn latest_release(&self) -> Result<String, FetchError> {
            Err(FetchError::Transport("offline".to_string()))
        }
    }

    /// Serves canned bodies; the cluster name and `logs` doc count change
    /// with every cycle so stale text can be told apart from fresh text.
    struct ScriptedSource {
        cycle: Cell<u32>,
        calls: RefCell<Vec<Endpoint>>,
        fail_at: Cell<Option<Endpoint>>,
    }

    impl ScriptedSource {
        fn new() -> Self {
            Self {
                cycle: Cell::new(0),
                calls: RefCell::new(Vec::new()),
                fail_at: Cell::new(None),
            }
        }

        fn body(&self, endpoint: Endpoint) -> String {
            let n = self.cycle.get();
            match endpoint {
                Endpoint::ClusterStats => format!(
                    r#"{{"cluster_name":"gen-{n}","status":"green","_nodes":{{"total":1,"successful":1,"failed":0}}}}"#
                ),
                Endpoint::NodesInfo => format!(
                    r#"{{"nodes":{{"id1":{{"name":"node-{n}","version":"8.15.0","roles":["master"]}}}}}}"#
                ),
                Endpoint::NodesStats => r#"{"nodes":{"id1":{"os":{"cpu":{"percent":5}}}}}"#.to_string(),
                Endpoint::NodeLoad => r#"[{"name":"node-1","load_1m":"0.50"}]"#.to_string(),
                Endpoint::ClusterHealth => r#"{"status":"green","active_shards":3}"#.to_string(),
                Endpoint::CatIndices => format!(
                    r#"[{{"index":"logs","health":"green","docs.count":"{}","store.size":"1kb","pri":"1","rep":"0"}}]"#,
                    100 * n
                ),
                Endpoint::IndexStats => r#"{"indices":{"logs":{}}}"#.to_string(),
                Endpoint::DataStreams => r#"{"data_streams":[]}"#.to_string(),
            }
        }

        fn next_cycle(&self) {
            self.cycle.set(self.cycle.get() + 1);
        }
    }

    impl SnapshotSource for ScriptedSource {
        fn fetch(&self, endpoint: Endpoint) -> Result<Payload, FetchError> {
            self.calls.borrow_mut().push(endpoint);
            if self.fail_at.get() == Some(endpoint) {
                return Err(FetchError::Status {
                    code: 503,
                    body: "unavailable".to_string(),
                });
            }
            Payload::decode(endpoint, &self.body(endpoint))
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(EvictionPolicy::Never, VersionCache::new(Box::new(NoRelease)))
    }

    fn text(d: &Dashboard, panel: Panel) -> String {
        d.panels()
            .get(panel)
            .iter()
            .map(|l| markup::strip(l))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_full_refresh_renders_every_panel() {
        let source = ScriptedSource::new();
        source.next_cycle();
        let mut d = dashboard();
        d.refresh(&source, Instant::now()).unwrap();

        assert_eq!(source.calls.borrow().as_slice(), Endpoint::REFRESH_ORDER);
        assert!(text(&d, Panel::Header).contains("gen-1"));
        assert!(text(&d, Panel::Header).contains("Latest: -"));
        assert!(text(&d, Panel::Nodes).contains("node-1"));
        assert!(text(&d, Panel::Nodes).contains("0.50"));
        assert!(text(&d, Panel::Roles).contains("Master"));
        assert!(text(&d, Panel::Indices).contains("logs"));
        assert!(text(&d, Panel::Metrics).contains("CPU:"));
        assert_eq!(d.tracker().len(), 1);
    }

    #[test]
    fn test_failure_stops_cycle_and_keeps_stale_panels() {
        let source = ScriptedSource::new();
        source.next_cycle();
        let mut d = dashboard();
        d.refresh(&source, Instant::now()).unwrap();
        let indices_before = text(&d, Panel::Indices);

        source.next_cycle();
        source.calls.borrow_mut().clear();
        source.fail_at.set(Some(Endpoint::NodesStats));
        let err = d.refresh(&source, Instant::now()).unwrap_err();
        assert!(matches!(err, FetchError::Status { code: 503, .. }));

        // Nothing after the failing endpoint was requested.
        assert_eq!(
            source.calls.borrow().as_slice(),
            &Endpoint::REFRESH_ORDER[..3]
        );
        // Rendered before the failure: fresh.
        assert!(text(&d, Panel::Header).contains("gen-2"));
        assert!(text(&d, Panel::Roles).contains("Master"));
        // Owner of the failing endpoint shows the error.
        assert_eq!(
            text(&d, Panel::Nodes),
            "Error: API request failed with status 503: unavailable"
        );
        // Not reached: stale from the previous cycle.
        assert_eq!(text(&d, Panel::Indices), indices_before);
    }

    #[test]
    fn test_header_failure_leaves_other_panels_untouched() {
        let source = ScriptedSource::new();
        source.next_cycle();
        let mut d = dashboard();
        d.refresh(&source, Instant::now()).unwrap();
        let nodes_before = text(&d, Panel::Nodes);

        source.next_cycle();
        source.fail_at.set(Some(Endpoint::ClusterStats));
        assert!(d.refresh(&source, Instant::now()).is_err());
        assert!(text(&d, Panel::Header).starts_with("Error: "));
        assert_eq!(text(&d, Panel::Nodes), nodes_before);
    }

    #[test]
    fn test_index_failure_keeps_tracker_baseline() {
        let source = ScriptedSource::new();
        source.next_cycle();
        let mut d = dashboard();
        let t0 = Instant::now();
        d.refresh(&source, t0).unwrap();

        source.next_cycle();
        source.fail_at.set(Some(Endpoint::DataStreams));
        assert!(d.refresh(&source, t0 + Duration::from_secs(5)).is_err());
        assert!(text(&d, Panel::Indices).starts_with("Error: "));
        // Metrics depend only on earlier endpoints and are fresh.
        assert!(text(&d, Panel::Metrics).contains("CPU:"));

        source.fail_at.set(None);
        source.next_cycle();
        d.refresh(&source, t0 + Duration::from_secs(10)).unwrap();
        let logs = d.tracker().get("logs").unwrap();
        assert_eq!(logs.baseline_count, 100);
        assert_eq!(logs.last_count, 300);
        assert!(text(&d, Panel::Indices).contains("+200"));
        assert!(text(&d, Panel::Indices).contains("20.0/s"));
    }

    #[test]
    fn test_toggle_recomputes_geometry() {
        let mut d = dashboard();
        assert!(d.geometry().placement(Panel::Metrics).is_some());
        d.toggle(Panel::Metrics);
        assert!(d.geometry().placement(Panel::Metrics).is_none());
        assert!(!d.visibility().metrics);

        let before = d.geometry().clone();
        d.toggle(Panel::Header);
        assert_eq!(d.geometry(), &before);
    }

    #[test]
    fn test_hidden_toggle_applies_on_next_refresh() {
        let source = ScriptedSource::new();
        source.next_cycle();
        let mut d = dashboard();
        d.refresh(&source, Instant::now()).unwrap();
        let before = text(&d, Panel::Indices);

        d.toggle_hidden();
        assert!(d.visibility().hidden_indices);
        assert_eq!(text(&d, Panel::Indices), before);
    }
}
