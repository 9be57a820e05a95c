use serde::Serialize;
use viewstage_input::{PointerState, ViewportState};
use viewstage_kernel::{FrameTime, LoopState, Stage};
use viewstage_render::{Intersection, Renderer};

/// Stage inspector for developer tooling.
///
/// Provides read-only snapshots of the stage for the debug panel and CLI.
pub struct StageInspector;

impl StageInspector {
    /// Produce a summary of the stage state.
    pub fn summary<R: Renderer>(stage: &Stage<R>) -> StageSummary {
        StageSummary {
            state: stage.state(),
            frames: stage.frames(),
            time: stage.frame_time(),
            viewport: stage.viewport(),
            pointer: stage.pointer(),
            node_count: stage.scene().len(),
            picking: stage.picking_enabled(),
            last_pick: stage.last_pick().map(|hit| PickInfo::describe(stage, &hit)),
        }
    }
}

/// Snapshot of the stage for display.
#[derive(Debug, Clone, Serialize)]
pub struct StageSummary {
    pub state: LoopState,
    pub frames: u64,
    pub time: FrameTime,
    pub viewport: ViewportState,
    pub pointer: PointerState,
    pub node_count: usize,
    pub picking: bool,
    pub last_pick: Option<PickInfo>,
}

impl StageSummary {
    pub fn fps(&self) -> f64 {
        if self.time.delta > 0.0 {
            1.0 / self.time.delta
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for StageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stage: state={} frames={} elapsed={:.3}s viewport={}x{} aspect={:.4} dpr={:.2} pointer=({:.4}, {:.4}) nodes={}",
            self.state,
            self.frames,
            self.time.elapsed,
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.aspect_ratio(),
            self.viewport.device_pixel_ratio(),
            self.pointer.ndc_x,
            self.pointer.ndc_y,
            self.node_count,
        )?;
        if let Some(pick) = &self.last_pick {
            write!(f, " pick={pick}")?;
        }
        Ok(())
    }
}

/// Nearest pointer hit, resolved to the node name.
#[derive(Debug, Clone, Serialize)]
pub struct PickInfo {
    pub node: String,
    pub distance: f32,
    pub point: [f32; 3],
}

impl PickInfo {
    fn describe<R: Renderer>(stage: &Stage<R>, hit: &Intersection) -> Self {
        let node = stage
            .scene()
            .get(hit.node)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| hit.node.short());
        Self {
            node,
            distance: hit.distance,
            point: hit.point.to_array(),
        }
    }
}

impl std::fmt::Display for PickInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} d={:.3} at ({:.2}, {:.2}, {:.2})",
            self.node, self.distance, self.point[0], self.point[1], self.point[2]
        )
    }
}
