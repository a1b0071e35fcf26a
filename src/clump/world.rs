//! Lifecycle manager: owns every clump and runs the post-edit cascade.
//!
//! After any field mutation `process` runs region analysis, splits off
//! disconnected regions into new clumps, recenters the field, recomputes mass
//! and destroys clumps that ran out of material, then rebuilds the mesh and
//! colliders of whatever survives.

use std::collections::HashMap;

use glam::{IVec2, Vec2};

use crate::brush::{BrushEditor, BrushStroke, EditReport};
use crate::core::{ClumpConfig, Error, Result, SplitPolicy};
use crate::field::{MassModel, NoiseFill, Region, RegionAnalyzer, ScalarField};
use crate::math::Transform2D;
use crate::mesh::{collider_polygons, IsosurfaceMesher, OutlineTracer};
use super::record::{Clump, ClumpId};

/// Why a clump was removed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DestroyReason {
    /// No cell above the surface threshold remained
    NoRegions,
    /// Total mass fell below the configured minimum
    BelowMinMass { mass: f32 },
    /// Removed explicitly by the caller
    Removed,
}

/// Creation and destruction notifications for the host engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifecycleEvent {
    Created { id: ClumpId, parent: Option<ClumpId> },
    Destroyed { id: ClumpId, reason: DestroyReason },
}

/// Summary of one processing cascade, including nested passes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessReport {
    /// Regions found on the first pass over the processed clump
    pub regions_found: usize,
    /// Clumps created by splits, in creation order
    pub created: Vec<ClumpId>,
    /// Clumps destroyed, in destruction order
    pub destroyed: Vec<(ClumpId, DestroyReason)>,
    /// Cells with material lost off the grid edge while recentering
    pub clipped_cells: usize,
}

impl ProcessReport {
    fn merge(&mut self, nested: ProcessReport) {
        self.created.extend(nested.created);
        self.destroyed.extend(nested.destroyed);
        self.clipped_cells += nested.clipped_cells;
    }

    /// Whether `id` was destroyed anywhere in the cascade.
    pub fn was_destroyed(&self, id: ClumpId) -> bool {
        self.destroyed.iter().any(|(d, _)| *d == id)
    }
}

/// Result of a brush edit and the cascade it triggered.
#[derive(Clone, Debug, PartialEq)]
pub struct EditOutcome {
    pub edit: EditReport,
    pub process: ProcessReport,
}

/// Owns all clumps and maps handles to them.
pub struct ClumpWorld {
    config: ClumpConfig,
    clumps: HashMap<ClumpId, Clump>,
    next_id: u64,
    events: Vec<LifecycleEvent>,
    analyzer: RegionAnalyzer,
    mass_model: MassModel,
    mesher: IsosurfaceMesher,
    brush: BrushEditor,
}

impl ClumpWorld {
    /// Create an empty world. Fails if the config is invalid.
    pub fn new(config: ClumpConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            analyzer: RegionAnalyzer::new(config.surface),
            mass_model: MassModel::new(config.surface, config.cell_size),
            mesher: IsosurfaceMesher::new(config.surface, config.max_weight, config.cell_size),
            brush: BrushEditor::new(config.max_weight, config.cut_bias),
            config,
            clumps: HashMap::new(),
            next_id: 1,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &ClumpConfig {
        &self.config
    }

    /// An empty field sized for this world.
    pub fn empty_field(&self) -> ScalarField {
        ScalarField::new(self.config.grid_size, self.config.max_weight)
    }

    pub fn get(&self, id: ClumpId) -> Option<&Clump> {
        self.clumps.get(&id)
    }

    pub fn contains(&self, id: ClumpId) -> bool {
        self.clumps.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.clumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clumps.is_empty()
    }

    /// Live clump handles in creation order.
    pub fn ids(&self) -> Vec<ClumpId> {
        let mut ids: Vec<_> = self.clumps.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clump> {
        self.clumps.values()
    }

    /// Take pending lifecycle events (clears the queue).
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    fn alloc_id(&mut self) -> ClumpId {
        let id = ClumpId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a clump without processing it. Returns the new handle.
    pub fn insert(&mut self, field: ScalarField, transform: Transform2D) -> Result<ClumpId> {
        self.check_field(&field)?;
        Ok(self.insert_child(field, transform, None))
    }

    fn insert_child(&mut self, field: ScalarField, transform: Transform2D, parent: Option<ClumpId>) -> ClumpId {
        let id = self.alloc_id();
        self.clumps.insert(id, Clump::new(id, field, transform));
        self.events.push(LifecycleEvent::Created { id, parent });
        id
    }

    /// Remove a clump explicitly.
    pub fn remove(&mut self, id: ClumpId) -> Option<Clump> {
        let clump = self.clumps.remove(&id)?;
        self.events.push(LifecycleEvent::Destroyed { id, reason: DestroyReason::Removed });
        Some(clump)
    }

    fn destroy(&mut self, id: ClumpId, reason: DestroyReason, report: &mut ProcessReport) {
        if self.clumps.remove(&id).is_some() {
            log::debug!("Destroying clump {:?}: {:?}", id, reason);
            self.events.push(LifecycleEvent::Destroyed { id, reason });
            report.destroyed.push((id, reason));
        }
    }

    fn check_field(&self, field: &ScalarField) -> Result<()> {
        if field.size() != self.config.grid_size {
            return Err(Error::InvalidField(format!(
                "field is {}x{}, world grid is {}x{}",
                field.size(), field.size(), self.config.grid_size, self.config.grid_size
            )));
        }
        Ok(())
    }

    /// Adopt an existing field as a new clump and process it.
    pub fn spawn_from_field(&mut self, field: ScalarField, transform: Transform2D) -> Result<(ClumpId, ProcessReport)> {
        let id = self.insert(field, transform)?;
        let report = self.process_map(id);
        Ok((id, report))
    }

    /// Generate a clump from the configured noise and process it.
    pub fn spawn_generated(&mut self, transform: Transform2D) -> (ClumpId, ProcessReport) {
        let field = NoiseFill::new(self.config.noise.clone())
            .generate(self.config.grid_size, self.config.max_weight);
        let id = self.insert_child(field, transform, None);
        let report = self.process_map(id);
        (id, report)
    }

    /// Apply a brush stroke: positive radius adds, negative radius cuts.
    pub fn edit(&mut self, id: ClumpId, world_position: Vec2, radius: f32, rate: f32) -> Result<EditOutcome> {
        let stroke = BrushStroke::from_signed(world_position, radius, rate)?;
        self.apply_stroke(id, &stroke)
    }

    /// Apply a prepared stroke and run the full cascade.
    pub fn apply_stroke(&mut self, id: ClumpId, stroke: &BrushStroke) -> Result<EditOutcome> {
        let cell_size = self.config.cell_size;
        let clump = self.clumps.get_mut(&id).ok_or(Error::UnknownClump(id))?;
        let edit = self.brush.apply_stroke(&mut clump.field, stroke, &clump.transform, cell_size);
        let process = self.process_map(id);
        Ok(EditOutcome { edit, process })
    }

    /// Re-run the cascade on a clump.
    pub fn process(&mut self, id: ClumpId) -> Result<ProcessReport> {
        if !self.contains(id) {
            return Err(Error::UnknownClump(id));
        }
        Ok(self.process_map(id))
    }

    fn process_map(&mut self, id: ClumpId) -> ProcessReport {
        let mut report = ProcessReport::default();
        let Some(clump) = self.clumps.get(&id) else {
            return report;
        };

        let regions = self.analyzer.analyze(&clump.field);
        report.regions_found = regions.len();

        if regions.is_empty() {
            self.destroy(id, DestroyReason::NoRegions, &mut report);
            return report;
        }

        if regions.len() > 1 {
            match self.config.split_policy {
                SplitPolicy::PeelLast => {
                    let last = &regions[regions.len() - 1];
                    let child = self.separate_region(id, last);
                    report.created.push(child);
                    let nested = self.process_map(id);
                    report.merge(nested);
                    let nested = self.process_map(child);
                    report.merge(nested);
                }
                SplitPolicy::AllButFirst => {
                    let children: Vec<ClumpId> = regions[1..]
                        .iter()
                        .map(|region| self.separate_region(id, region))
                        .collect();
                    report.created.extend(&children);
                    for child in children {
                        let nested = self.process_map(child);
                        report.merge(nested);
                    }
                }
            }
            if !self.contains(id) {
                return report;
            }
        }

        report.clipped_cells += self.recenter(id);

        let min_mass = self.config.min_mass();
        let Some(clump) = self.clumps.get_mut(&id) else {
            return report;
        };
        let computed = self.mass_model.calculate(&clump.field);
        if let Some(props) = computed {
            clump.mass = Some(props);
        }
        let mass = computed.map_or(0.0, |p| p.mass);
        if mass < min_mass {
            self.destroy(id, DestroyReason::BelowMinMass { mass }, &mut report);
            return report;
        }

        self.rebuild_mesh(id);
        report
    }

    /// Move `region`'s cells out of clump `id` into a new clump at the same transform.
    fn separate_region(&mut self, id: ClumpId, region: &Region) -> ClumpId {
        let (field, transform) = match self.clumps.get_mut(&id) {
            Some(clump) => (clump.field.take_cells(&region.cells), clump.transform),
            None => (self.empty_field(), Transform2D::identity()),
        };
        let child = self.insert_child(field, transform, Some(id));
        log::debug!("Split {} cells from clump {:?} into {:?}", region.len(), id, child);
        child
    }

    /// Shift the field so its solid centroid sits at the grid center.
    ///
    /// Returns the number of cells whose material was pushed off the grid.
    fn recenter(&mut self, id: ClumpId) -> usize {
        let surface = self.config.surface;
        let cell_size = self.config.cell_size;
        let Some(clump) = self.clumps.get_mut(&id) else {
            return 0;
        };
        let Some(centroid) = clump.field.solid_centroid(surface) else {
            return 0;
        };

        let offset = centroid - clump.field.center();
        if offset == IVec2::ZERO {
            return 0;
        }

        let shifted = clump.field.shifted(offset);
        if shifted.dropped_cells > 0 {
            log::warn!(
                "Recentering clump {:?} by {:?} dropped {} cells ({:.2} density) off the grid",
                id, offset, shifted.dropped_cells, shifted.dropped_density
            );
        }
        clump.field = shifted.field;
        clump.transform.translate_local(offset.as_vec2() * cell_size);
        shifted.dropped_cells
    }

    fn rebuild_mesh(&mut self, id: ClumpId) {
        let Some(clump) = self.clumps.get_mut(&id) else {
            return;
        };
        clump.mesh = self.mesher.build(&clump.field);
        clump.outlines = OutlineTracer::new(&clump.mesh).trace();
        clump.colliders = collider_polygons(&clump.mesh, &clump.outlines);
        log::trace!(
            "Rebuilt clump {:?}: {} triangles, {} colliders",
            id, clump.mesh.triangle_count(), clump.colliders.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoiseParams;
    use std::collections::HashMap;

    fn world() -> ClumpWorld {
        ClumpWorld::new(ClumpConfig::default()).unwrap()
    }

    fn world_with(policy: SplitPolicy) -> ClumpWorld {
        ClumpWorld::new(ClumpConfig { split_policy: policy, ..Default::default() }).unwrap()
    }

    /// Nonzero cells of every live clump keyed by original grid coordinate.
    fn world_cells(world: &ClumpWorld) -> HashMap<IVec2, f32> {
        let cell_size = world.config().cell_size;
        let mut cells = HashMap::new();
        for clump in world.iter() {
            for (coord, v) in clump.field().iter().filter(|&(_, v)| v > 0.0) {
                let world_pos = clump.cell_to_world(coord, cell_size);
                let grid = (world_pos / cell_size).round().as_ivec2();
                assert!(cells.insert(grid, v).is_none(), "cell {:?} owned twice", grid);
            }
        }
        cells
    }

    /// Three disjoint regions of mass 36, 16 and 64 in row-major seed order.
    fn three_regions(world: &ClumpWorld) -> ScalarField {
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(5, 5), IVec2::new(8, 8), 4.0);
        field.fill_rect(IVec2::new(30, 5), IVec2::new(32, 7), 4.0);
        field.fill_rect(IVec2::new(40, 40), IVec2::new(44, 44), 4.0);
        field
    }

    /// Mass of each created child, in `report.created` order.
    fn created_masses(world: &ClumpWorld, report: &ProcessReport) -> Vec<f32> {
        report
            .created
            .iter()
            .map(|id| world.get(*id).unwrap().mass().unwrap().mass)
            .collect()
    }

    #[test]
    fn test_full_solid_clump() {
        let mut field = ScalarField::new(64, 4.0);
        field.fill(4.0);

        // Derived data before any lifecycle processing
        let regions = RegionAnalyzer::new(0.5).analyze(&field);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].len(), 4096);
        let props = MassModel::new(0.5, 0.5).calculate(&field).unwrap();
        assert!((props.mass - 4096.0 * 4.0).abs() < 1e-2);

        let mut world = world();
        let (id, report) = world.spawn_from_field(field, Transform2D::identity()).unwrap();
        assert_eq!(report.regions_found, 1);
        assert!(report.destroyed.is_empty());

        // Truncated centroid 31 vs center 32: one row and one column fall off.
        assert_eq!(report.clipped_cells, 127);
        let clump = world.get(id).unwrap();
        assert!((clump.mass().unwrap().mass - 63.0 * 63.0 * 4.0).abs() < 1e-2);
        assert!((clump.transform().position - Vec2::new(-0.5, -0.5)).length() < 1e-6);
        assert!(!clump.mesh().is_empty());
        assert_eq!(clump.colliders().len(), 1);
    }

    #[test]
    fn test_large_cut_erases_small_clump() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(31, 31), IVec2::new(33, 33), 4.0);
        let (id, report) = world.spawn_from_field(field, Transform2D::identity()).unwrap();
        assert!(report.destroyed.is_empty());

        let center = world.get(id).unwrap().cell_to_world(IVec2::new(32, 32), 0.5);
        let outcome = world.edit(id, center, -64.0, 1.0).unwrap();

        assert!(outcome.edit.cells_changed >= 4);
        assert!(outcome.process.was_destroyed(id));
        assert!(!world.contains(id));
        assert!(matches!(
            world.drain_events().last(),
            Some(LifecycleEvent::Destroyed { .. })
        ));
    }

    #[test]
    fn test_light_clump_destroyed_below_min_mass() {
        let mut world = world();
        let mut field = world.empty_field();
        field.set(20, 20, 3.0);
        let (id, report) = world.spawn_from_field(field, Transform2D::identity()).unwrap();

        assert!(!world.contains(id));
        assert_eq!(report.destroyed, vec![(id, DestroyReason::BelowMinMass { mass: 3.0 })]);
    }

    #[test]
    fn test_empty_field_destroyed() {
        let mut world = world();
        let field = world.empty_field();
        let (id, report) = world.spawn_from_field(field, Transform2D::identity()).unwrap();
        assert_eq!(report.destroyed, vec![(id, DestroyReason::NoRegions)]);
        assert!(world.is_empty());
    }

    #[test]
    fn test_split_preserves_every_cell() {
        for policy in [SplitPolicy::PeelLast, SplitPolicy::AllButFirst] {
            let mut world = world_with(policy);
            let mut field = world.empty_field();
            field.fill_rect(IVec2::new(10, 10), IVec2::new(13, 13), 4.0);
            field.fill_rect(IVec2::new(40, 40), IVec2::new(43, 43), 4.0);
            let original: HashMap<IVec2, f32> = field
                .iter()
                .filter(|&(_, v)| v > 0.0)
                .collect();

            let (id, report) = world.spawn_from_field(field, Transform2D::identity()).unwrap();
            assert_eq!(report.regions_found, 2, "{:?}", policy);
            assert_eq!(report.created.len(), 1, "{:?}", policy);
            assert_eq!(report.clipped_cells, 0, "{:?}", policy);
            assert_eq!(world.len(), 2, "{:?}", policy);
            assert!(world.contains(id));

            assert_eq!(world_cells(&world), original, "{:?}", policy);
            for clump in world.iter() {
                assert!((clump.mass().unwrap().mass - 36.0).abs() < 1e-4);
                assert_eq!(clump.colliders().len(), 1);
            }

            let events = world.drain_events();
            assert!(events.contains(&LifecycleEvent::Created { id: report.created[0], parent: Some(id) }));
        }
    }

    #[test]
    fn test_peel_last_splits_one_region_per_pass() {
        let mut world = world_with(SplitPolicy::PeelLast);
        let field = three_regions(&world);
        let (id, report) = world.spawn_from_field(field, Transform2D::identity()).unwrap();

        assert_eq!(world.len(), 3);
        assert_eq!(report.regions_found, 3);
        // Last region (mass 64) goes first, then the middle one
        assert_eq!(created_masses(&world, &report), vec![64.0, 16.0]);
        assert!((world.get(id).unwrap().mass().unwrap().mass - 36.0).abs() < 1e-4);
    }

    #[test]
    fn test_all_but_first_splits_in_one_pass() {
        let mut world = world_with(SplitPolicy::AllButFirst);
        let field = three_regions(&world);
        let (id, report) = world.spawn_from_field(field, Transform2D::identity()).unwrap();

        assert_eq!(world.len(), 3);
        assert_eq!(created_masses(&world, &report), vec![16.0, 64.0]);
        assert!((world.get(id).unwrap().mass().unwrap().mass - 36.0).abs() < 1e-4);
        for child in &report.created {
            assert_eq!(
                world.get(*child).map(|c| c.field.size()),
                Some(64)
            );
        }
    }

    #[test]
    fn test_both_policies_keep_total_density() {
        for policy in [SplitPolicy::PeelLast, SplitPolicy::AllButFirst] {
            let mut world = world_with(policy);
            let field = three_regions(&world);
            let original: HashMap<IVec2, f32> = field.iter().filter(|&(_, v)| v > 0.0).collect();
            world.spawn_from_field(field, Transform2D::identity()).unwrap();
            assert_eq!(world_cells(&world), original, "{:?}", policy);
        }
    }

    #[test]
    fn test_zero_rate_edit_changes_nothing() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(20, 20), IVec2::new(40, 40), 4.0);
        let (id, _) = world.spawn_from_field(field, Transform2D::identity()).unwrap();
        let before = world.get(id).unwrap().field().clone();

        let outcome = world.edit(id, Vec2::new(16.0, 16.0), 6.0, 0.0).unwrap();
        assert_eq!(outcome.edit.cells_changed, 0);
        assert_eq!(outcome.process.clipped_cells, 0);
        let after = world.get(id).unwrap().field();
        for (a, b) in after.values().iter().zip(before.values()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_cut_through_middle_splits_clump() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(12, 28), IVec2::new(52, 36), 4.0);
        let (id, _) = world.spawn_from_field(field, Transform2D::identity()).unwrap();
        world.drain_events();

        // Carve a vertical channel through the bar's center
        let channel: Vec<Vec2> = {
            let clump = world.get(id).unwrap();
            (-6..=6)
                .map(|dy| clump.cell_to_world(IVec2::new(32, 32 + dy), 0.5))
                .collect()
        };
        for pos in channel {
            world.edit(id, pos, -3.0, 1.0).unwrap();
            if world.len() > 1 {
                break;
            }
        }

        assert_eq!(world.len(), 2);
        assert!(world.contains(id));
        let created = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, LifecycleEvent::Created { parent: Some(p), .. } if *p == id))
            .count();
        assert!(created >= 1);
    }

    #[test]
    fn test_add_grows_mass() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(28, 28), IVec2::new(36, 36), 4.0);
        let (id, _) = world.spawn_from_field(field, Transform2D::identity()).unwrap();
        let before = world.get(id).unwrap().mass().unwrap().mass;

        let edge = world.get(id).unwrap().cell_to_world(IVec2::new(37, 32), 0.5);
        let outcome = world.edit(id, edge, 4.0, 0.5).unwrap();
        assert!(outcome.edit.cells_changed > 0);
        assert!(world.get(id).unwrap().mass().unwrap().mass > before);
    }

    #[test]
    fn test_edit_errors() {
        let mut world = world();
        let missing = ClumpId(99);
        assert!(matches!(
            world.edit(missing, Vec2::ZERO, 1.0, 1.0),
            Err(Error::UnknownClump(id)) if id == missing
        ));

        let id = world.insert(world.empty_field(), Transform2D::identity()).unwrap();
        assert!(matches!(
            world.edit(id, Vec2::ZERO, f32::NAN, 1.0),
            Err(Error::InvalidBrush(_))
        ));
    }

    #[test]
    fn test_huge_cut_radius_erases_without_overflow() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(20, 20), IVec2::new(44, 44), 4.0);
        let (id, _) = world.spawn_from_field(field, Transform2D::identity()).unwrap();

        let outcome = world.edit(id, Vec2::new(-100.0, 0.0), -3.0e9, 1.0).unwrap();
        assert_eq!(outcome.edit.cells_visited, 64 * 64);
        assert_eq!(outcome.process.destroyed, vec![(id, DestroyReason::NoRegions)]);
        assert!(world.is_empty());
    }

    #[test]
    fn test_field_size_must_match_world() {
        let mut world = world();
        let field = ScalarField::new(16, 4.0);
        assert!(matches!(
            world.spawn_from_field(field, Transform2D::identity()),
            Err(Error::InvalidField(_))
        ));
    }

    #[test]
    fn test_spawn_generated_flat_noise_survives() {
        let config = ClumpConfig {
            grid_size: 32,
            noise: NoiseParams { magnitude: 0.0, fill: 4.0, ..Default::default() },
            ..Default::default()
        };
        let mut world = ClumpWorld::new(config).unwrap();
        let (id, report) = world.spawn_generated(Transform2D::from_position(Vec2::new(5.0, 0.0)));
        assert!(world.contains(id));
        assert_eq!(report.regions_found, 1);
        assert_eq!(
            world.drain_events().first(),
            Some(&LifecycleEvent::Created { id, parent: None })
        );
    }

    #[test]
    fn test_remove_emits_event() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(30, 30), IVec2::new(34, 34), 4.0);
        let id = world.insert(field, Transform2D::identity()).unwrap();
        assert!(world.get(id).unwrap().mesh().is_empty());

        assert!(world.remove(id).is_some());
        assert!(world.remove(id).is_none());
        assert_eq!(
            world.drain_events().last(),
            Some(&LifecycleEvent::Destroyed { id, reason: DestroyReason::Removed })
        );
        assert!(matches!(world.process(id), Err(Error::UnknownClump(_))));
    }

    #[test]
    fn test_physics_handoff_matches_clump() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(30, 30), IVec2::new(34, 34), 4.0);
        let (id, _) = world.spawn_from_field(field, Transform2D::identity()).unwrap();

        let clump = world.get(id).unwrap();
        let physics = clump.physics();
        assert!((physics.mass.unwrap().mass - 64.0).abs() < 1e-4);
        assert_eq!(physics.colliders.len(), clump.outlines().len());
        // Centered block: center of mass near the grid center in world units
        let com = clump.world_center_of_mass().unwrap();
        assert!((com - Vec2::new(15.75, 15.75)).length() < 1e-4);
    }

    #[test]
    fn test_rotated_clump_keeps_world_positions_after_recenter() {
        let mut world = world();
        let mut field = world.empty_field();
        field.fill_rect(IVec2::new(5, 5), IVec2::new(9, 9), 4.0);
        let transform = Transform2D::new(Vec2::new(2.0, 3.0), 0.6);
        let before = transform.transform_point(IVec2::new(5, 5).as_vec2() * 0.5);

        let (id, _) = world.spawn_from_field(field, transform).unwrap();
        let clump = world.get(id).unwrap();
        let corner = clump
            .field()
            .solid_cells(0.5)
            .map(|(c, _)| c)
            .min_by_key(|c| (c.x, c.y))
            .unwrap();
        let after = clump.cell_to_world(corner, 0.5);
        assert!((after - before).length() < 1e-4);
    }
}
