//! Frame sequencing
//!
//! Each motion frame renders the current state, writes it under its forward
//! index, rasterizes it under the reversed index, then steps the simulation.
//! Reading the raster stream in ascending order plays the motion backward,
//! which downstream assembly joins with the forward stream into a loop.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SequenceError};
use crate::renderer::{Rasterizer, SvgStyle, render_svg};
use crate::sim::{DiskSystem, step};

/// Frame budget, split into phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramePlan {
    pub motion_frames: u32,
    /// Hold of the final motion frame (declared, not rendered)
    pub static_frames: u32,
    /// Trailing title card (declared, not rendered)
    pub text_frames: u32,
}

impl Default for FramePlan {
    fn default() -> Self {
        Self {
            motion_frames: MOTION_FRAMES,
            static_frames: STATIC_FRAMES,
            text_frames: TEXT_FRAMES,
        }
    }
}

/// Output indices of one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRoute {
    pub frame: u32,
    pub forward_index: u32,
    pub reversed_index: u32,
}

impl FramePlan {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.motion_frames < 2 {
            return Err(ConfigError::TooFewFrames(self.motion_frames));
        }
        if self.checked_total().is_none() {
            return Err(ConfigError::FrameBudget {
                motion: self.motion_frames,
                static_hold: self.static_frames,
                text: self.text_frames,
            });
        }
        Ok(())
    }

    fn checked_total(&self) -> Option<u32> {
        self.motion_frames
            .checked_add(self.static_frames)?
            .checked_add(self.text_frames)
    }

    /// Sum of all three phases (saturates at `u32::MAX`)
    pub fn total_frames(&self) -> u32 {
        self.checked_total().unwrap_or(u32::MAX)
    }

    /// Frames actually rendered: `1..motion_frames`
    pub fn rendered_frames(&self) -> u32 {
        self.motion_frames.saturating_sub(1)
    }

    pub fn routes(&self) -> impl Iterator<Item = FrameRoute> + use<> {
        let motion_frames = self.motion_frames;
        (1..motion_frames).map(move |frame| FrameRoute {
            frame,
            forward_index: frame,
            reversed_index: motion_frames - frame,
        })
    }
}

/// Where frame artifacts go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub prefix: String,
    pub vector_ext: String,
    pub raster_ext: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("frames"),
            prefix: "frame".to_string(),
            vector_ext: "svg".to_string(),
            raster_ext: "jpg".to_string(),
        }
    }
}

impl OutputLayout {
    pub fn vector_path(&self, index: u32) -> PathBuf {
        self.path(index, &self.vector_ext)
    }

    pub fn raster_path(&self, index: u32) -> PathBuf {
        self.path(index, &self.raster_ext)
    }

    fn path(&self, index: u32, ext: &str) -> PathBuf {
        self.dir.join(format!("{}{}.{}", self.prefix, index, ext))
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub plan: FramePlan,
    pub frames_rendered: u32,
    pub wall_flips: usize,
}

/// Drives the simulation and routes every frame to its artifacts
pub struct FrameSequencer<R: Rasterizer> {
    system: DiskSystem,
    plan: FramePlan,
    output: OutputLayout,
    style: SvgStyle,
    rasterizer: R,
}

impl<R: Rasterizer> FrameSequencer<R> {
    pub fn new(
        system: DiskSystem,
        plan: FramePlan,
        output: OutputLayout,
        style: SvgStyle,
        rasterizer: R,
    ) -> Result<Self, ConfigError> {
        plan.validate()?;
        Ok(Self {
            system,
            plan,
            output,
            style,
            rasterizer,
        })
    }

    pub fn system(&self) -> &DiskSystem {
        &self.system
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn output(&self) -> &OutputLayout {
        &self.output
    }

    /// Render every motion frame; stops at the first failure
    pub fn run(&mut self) -> Result<RunSummary, SequenceError> {
        fs::create_dir_all(&self.output.dir).map_err(|source| SequenceError::OutputDir {
            path: self.output.dir.clone(),
            source,
        })?;

        log::info!(
            "Rendering {} frames of {} disks into {}",
            self.plan.rendered_frames(),
            self.system.len(),
            self.output.dir.display()
        );
        if self.plan.static_frames > 0 || self.plan.text_frames > 0 {
            log::warn!(
                "static ({}) and text ({}) frames are declared but not rendered; total budget {}",
                self.plan.static_frames,
                self.plan.text_frames,
                self.plan.total_frames()
            );
        }

        let mut wall_flips = 0;
        let mut frames_rendered = 0;

        for route in self.plan.routes() {
            let vector = self.output.vector_path(route.forward_index);
            let raster = self.output.raster_path(route.reversed_index);

            self.write_frame(route.frame, &vector)?;
            self.rasterizer
                .rasterize(&vector, &raster)
                .map_err(|source| SequenceError::Raster {
                    frame: route.frame,
                    source,
                })?;

            let report = step(&mut self.system);
            wall_flips += report.total();
            frames_rendered += 1;

            log::debug!(
                "frame {} -> {} / {} ({} flips)",
                route.frame,
                vector.display(),
                raster.display(),
                report.total()
            );
            if route.frame % 60 == 0 {
                log::info!("frame {}/{}", route.frame, self.plan.rendered_frames());
            }
        }

        let summary = RunSummary {
            plan: self.plan,
            frames_rendered,
            wall_flips,
        };
        log::info!(
            "Done: {} frames, {} wall reflections",
            summary.frames_rendered,
            summary.wall_flips
        );
        Ok(summary)
    }

    fn write_frame(&self, frame: u32, path: &Path) -> Result<(), SequenceError> {
        let doc = render_svg(&self.system, &self.style);
        fs::write(path, doc).map_err(|source| SequenceError::Write {
            frame,
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;
    use crate::settings::Settings;

    #[derive(Default)]
    struct Recording {
        calls: Vec<(PathBuf, PathBuf)>,
        fail_at: Option<usize>,
    }

    impl Rasterizer for Recording {
        fn rasterize(&mut self, vector: &Path, raster: &Path) -> Result<(), RasterError> {
            self.calls.push((vector.to_path_buf(), raster.to_path_buf()));
            if Some(self.calls.len()) == self.fail_at {
                return Err(RasterError::Spawn {
                    program: "recording".to_string(),
                    source: std::io::Error::other("boom"),
                });
            }
            Ok(())
        }
    }

    fn small_plan(motion_frames: u32) -> FramePlan {
        FramePlan {
            motion_frames,
            ..Default::default()
        }
    }

    #[test]
    fn test_routes_pair_forward_with_reversed() {
        let routes: Vec<_> = FramePlan::default().routes().collect();
        assert_eq!(routes.len(), 359);
        assert_eq!(
            routes[0],
            FrameRoute {
                frame: 1,
                forward_index: 1,
                reversed_index: 359
            }
        );
        assert_eq!(routes[358].reversed_index, 1);
        assert!(routes.iter().all(|r| r.forward_index + r.reversed_index == 360));
    }

    #[test]
    fn test_total_frames_is_phase_sum() {
        let plan = FramePlan::default();
        assert_eq!(plan.total_frames(), 360 + 15 + 75);
        assert_eq!(plan.rendered_frames(), 359);
        assert!(small_plan(1).validate().is_err());
        assert_eq!(small_plan(1).routes().count(), 0);
    }

    #[test]
    fn test_frame_budget_overflow_rejected() {
        let json = r#"{ "motion_frames": 360, "static_frames": 4294967295, "text_frames": 75 }"#;
        let plan: FramePlan = serde_json::from_str(json).unwrap();
        assert!(matches!(plan.validate(), Err(ConfigError::FrameBudget { .. })));
        assert_eq!(plan.total_frames(), u32::MAX);

        let plan = FramePlan {
            motion_frames: u32::MAX - 90,
            static_frames: 15,
            text_frames: 75,
        };
        assert!(plan.validate().is_ok());
        assert_eq!(plan.total_frames(), u32::MAX);
    }

    #[test]
    fn test_new_rejects_unrenderable_plan() {
        let system = DiskSystem::seeded(&Settings::default(), 3).unwrap();
        let result = FrameSequencer::new(
            system,
            small_plan(0),
            OutputLayout::default(),
            SvgStyle::default(),
            Recording::default(),
        );
        assert!(matches!(result, Err(ConfigError::TooFewFrames(0))));
    }

    #[test]
    fn test_output_paths() {
        let output = OutputLayout {
            dir: PathBuf::from("out"),
            prefix: "test".to_string(),
            ..Default::default()
        };
        assert_eq!(output.vector_path(3), Path::new("out").join("test3.svg"));
        assert_eq!(output.raster_path(357), Path::new("out").join("test357.jpg"));
    }

    #[test]
    fn test_run_writes_forward_vectors_and_reversed_rasters() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputLayout {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let system = DiskSystem::seeded(&Settings::default(), 3).unwrap();
        let mut sequencer = FrameSequencer::new(
            system,
            small_plan(6),
            output.clone(),
            SvgStyle::default(),
            Recording::default(),
        )
        .unwrap();

        let summary = sequencer.run().unwrap();
        assert_eq!(summary.frames_rendered, 5);
        assert_eq!(sequencer.system().step_count, 5);

        let calls = &sequencer.rasterizer().calls;
        assert_eq!(calls.len(), 5);
        for (i, (vector, raster)) in calls.iter().enumerate() {
            let frame = i as u32 + 1;
            assert_eq!(*vector, output.vector_path(frame));
            assert_eq!(*raster, output.raster_path(6 - frame));
            assert!(vector.exists());
        }
    }

    #[test]
    fn test_first_frame_shows_initial_layout() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputLayout {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let system = DiskSystem::seeded(&Settings::default(), 3).unwrap();
        let expected = render_svg(&system, &SvgStyle::default());
        let mut sequencer = FrameSequencer::new(
            system,
            small_plan(3),
            output.clone(),
            SvgStyle::default(),
            Recording::default(),
        )
        .unwrap();
        sequencer.run().unwrap();

        let frame1 = fs::read_to_string(output.vector_path(1)).unwrap();
        assert_eq!(frame1, expected);
        let frame2 = fs::read_to_string(output.vector_path(2)).unwrap();
        assert_ne!(frame2, expected);
    }

    #[test]
    fn test_raster_failure_halts_with_frame_index() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputLayout {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let system = DiskSystem::seeded(&Settings::default(), 3).unwrap();
        let mut sequencer = FrameSequencer::new(
            system,
            small_plan(10),
            output.clone(),
            SvgStyle::default(),
            Recording {
                fail_at: Some(3),
                ..Default::default()
            },
        )
        .unwrap();

        let err = sequencer.run().unwrap_err();
        assert!(matches!(err, SequenceError::Raster { frame: 3, .. }));
        assert_eq!(sequencer.rasterizer().calls.len(), 3);
        // The failing frame is not stepped past and nothing later is written
        assert_eq!(sequencer.system().step_count, 2);
        assert!(!output.vector_path(4).exists());
    }
}
