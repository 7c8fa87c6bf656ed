//! SceneBuilder, a fluent API for scripting scene scenarios in tests.
//!
//! All methods accept string names instead of arena keys for readability,
//! and every analysis call runs the real library path, not a simulation.

use std::collections::HashMap;

use geom_kernel::{Point3d, Transform};
use scene_types::{DefinitionId, EntityId, EntityKind, Scene};
use shape_analysis::{analyze_selection, AnalysisReport, ShapeClass};

use crate::helpers::{self, HarnessError};

/// A fluent builder for constructing and analyzing scenes in tests.
///
/// Wraps a [`Scene`] and keeps name maps for placed containers and
/// definitions so scenarios read as prose.
pub struct SceneBuilder {
    pub scene: Scene,
    named: HashMap<String, EntityId>,
    definitions: HashMap<String, DefinitionId>,
}

impl SceneBuilder {
    pub fn new(model_name: &str) -> Self {
        Self {
            scene: Scene::new(model_name),
            named: HashMap::new(),
            definitions: HashMap::new(),
        }
    }

    // ── Definitions ─────────────────────────────────────────────────────

    /// Register an empty definition under `name`.
    pub fn empty_definition(&mut self, name: &str) -> Result<DefinitionId, HarnessError> {
        if self.definitions.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        let id = self.scene.add_definition(name, "");
        self.definitions.insert(name.to_string(), id);
        Ok(id)
    }

    /// Definition holding a complete axis-aligned box.
    pub fn box_definition(
        &mut self,
        name: &str,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Result<DefinitionId, HarnessError> {
        let id = self.empty_definition(name)?;
        helpers::box_geometry(&mut self.scene, id, width, depth, height);
        Ok(id)
    }

    /// Definition holding a cube of the given side.
    pub fn cube_definition(&mut self, name: &str, side: f64) -> Result<DefinitionId, HarnessError> {
        self.box_definition(name, side, side, side)
    }

    /// Definition holding a single rectangular face with its edges.
    pub fn panel_definition(
        &mut self,
        name: &str,
        width: f64,
        height: f64,
    ) -> Result<DefinitionId, HarnessError> {
        let id = self.empty_definition(name)?;
        helpers::rect_face(&mut self.scene, Some(id), Point3d::ORIGIN, width, height);
        Ok(id)
    }

    /// Set a definition's description after the fact.
    pub fn describe(&mut self, definition: &str, text: &str) -> Result<&mut Self, HarnessError> {
        let id = self.definition_id(definition)?;
        if let Some(def) = self.scene.definitions.get_mut(id) {
            def.description = text.to_string();
        }
        Ok(self)
    }

    // ── Placement ───────────────────────────────────────────────────────

    /// Place a group of `definition` at the root, translated to `at`.
    pub fn place_group(
        &mut self,
        name: &str,
        definition: &str,
        at: [f64; 3],
    ) -> Result<EntityId, HarnessError> {
        self.place_group_with(name, definition, Transform::translation(at[0], at[1], at[2]))
    }

    /// Place a group at the root with an arbitrary placement transform.
    pub fn place_group_with(
        &mut self,
        name: &str,
        definition: &str,
        transform: Transform,
    ) -> Result<EntityId, HarnessError> {
        self.check_name_available(name)?;
        let def = self.definition_id(definition)?;
        let id = self.scene.add_group(None, def, transform);
        self.named.insert(name.to_string(), id);
        Ok(id)
    }

    /// Place a component instance of `definition` at the root.
    pub fn place_instance(
        &mut self,
        name: &str,
        definition: &str,
        at: [f64; 3],
    ) -> Result<EntityId, HarnessError> {
        self.place_instance_with(name, definition, Transform::translation(at[0], at[1], at[2]))
    }

    /// Place a component instance at the root with an arbitrary transform.
    pub fn place_instance_with(
        &mut self,
        name: &str,
        definition: &str,
        transform: Transform,
    ) -> Result<EntityId, HarnessError> {
        self.check_name_available(name)?;
        let def = self.definition_id(definition)?;
        let id = self.scene.add_instance(None, def, transform);
        self.named.insert(name.to_string(), id);
        Ok(id)
    }

    /// Place a group of `definition` inside another definition, for nested
    /// assemblies.
    pub fn place_group_in(
        &mut self,
        name: &str,
        definition: &str,
        host: &str,
        at: [f64; 3],
    ) -> Result<EntityId, HarnessError> {
        self.check_name_available(name)?;
        let def = self.definition_id(definition)?;
        let host_def = self.definition_id(host)?;
        let id = self.scene.add_group(
            Some(host_def),
            def,
            Transform::translation(at[0], at[1], at[2]),
        );
        self.named.insert(name.to_string(), id);
        Ok(id)
    }

    // ── Decoration ──────────────────────────────────────────────────────

    pub fn tag(&mut self, name: &str, value: &str) -> Result<&mut Self, HarnessError> {
        let id = self.entity(name)?;
        self.scene.set_tag(id, value);
        Ok(self)
    }

    pub fn material(&mut self, name: &str, value: &str) -> Result<&mut Self, HarnessError> {
        let id = self.entity(name)?;
        self.scene.set_material(id, value);
        Ok(self)
    }

    // ── Access ──────────────────────────────────────────────────────────

    /// Arena key of a placed container.
    pub fn entity(&self, name: &str) -> Result<EntityId, HarnessError> {
        self.named
            .get(name)
            .copied()
            .ok_or_else(|| HarnessError::EntityNotFound {
                name: name.to_string(),
            })
    }

    /// Arena key of a registered definition.
    pub fn definition_id(&self, name: &str) -> Result<DefinitionId, HarnessError> {
        self.definitions
            .get(name)
            .copied()
            .ok_or_else(|| HarnessError::DefinitionNotFound {
                name: name.to_string(),
            })
    }

    /// First face inside a placed container's definition.
    pub fn face_of(&self, name: &str) -> Result<EntityId, HarnessError> {
        self.child_of_kind(name, |kind| matches!(kind, EntityKind::Face { .. }))
    }

    /// First edge inside a placed container's definition.
    pub fn edge_of(&self, name: &str) -> Result<EntityId, HarnessError> {
        self.child_of_kind(name, |kind| matches!(kind, EntityKind::Edge { .. }))
    }

    /// First vertex inside a placed container's definition.
    pub fn vertex_of(&self, name: &str) -> Result<EntityId, HarnessError> {
        self.child_of_kind(name, |kind| matches!(kind, EntityKind::Vertex { .. }))
    }

    fn child_of_kind(
        &self,
        name: &str,
        matching: impl Fn(&EntityKind) -> bool,
    ) -> Result<EntityId, HarnessError> {
        let container = self.entity(name)?;
        self.scene
            .children(container)
            .iter()
            .copied()
            .find(|&id| self.scene.entity(id).is_some_and(|e| matching(&e.kind)))
            .ok_or_else(|| HarnessError::EntityNotFound {
                name: format!("{name} child"),
            })
    }

    // ── Analysis ────────────────────────────────────────────────────────

    /// Classifier verdict for a container's first face. Only faces, edges,
    /// and vertices get verdicts, so the face stands in for the assembly.
    pub fn classify_face(&self, name: &str) -> Result<Option<ShapeClass>, HarnessError> {
        let face = self.face_of(name)?;
        Ok(shape_analysis::classify(&self.scene, face))
    }

    /// Full analysis report for a placed container.
    pub fn report(&self, name: &str) -> Result<AnalysisReport, HarnessError> {
        let id = self.entity(name)?;
        Ok(analyze_selection(&self.scene, id)?)
    }

    /// Full analysis report for an arbitrary selection, for picking a face
    /// or edge out of an assembly.
    pub fn report_for(&self, id: EntityId) -> Result<AnalysisReport, HarnessError> {
        Ok(analyze_selection(&self.scene, id)?)
    }

    /// Export the scene as a document.
    pub fn export(&self) -> Result<scene_export::ModelDocument, HarnessError> {
        Ok(scene_export::export_model(&self.scene)?)
    }

    /// Export the scene and render it as pretty JSON.
    pub fn export_json(&self) -> Result<String, HarnessError> {
        Ok(scene_export::to_json_pretty(&self.export()?))
    }

    // ── Inline Assertions ───────────────────────────────────────────────

    /// Assert a container's first face classifies as `expected`.
    pub fn assert_shape(&self, name: &str, expected: ShapeClass) -> Result<&Self, HarnessError> {
        let actual = self.classify_face(name)?;
        if actual == Some(expected) {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("[{name}] expected {expected:?}, got {actual:?}"),
            })
        }
    }

    /// Assert a container's first face gets no verdict at all.
    pub fn assert_unclassified(&self, name: &str) -> Result<&Self, HarnessError> {
        let actual = self.classify_face(name)?;
        if actual.is_none() {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("[{name}] expected no verdict, got {actual:?}"),
            })
        }
    }

    /// Assert two placed containers' world bounds overlap or touch.
    pub fn assert_intersects(&self, a: &str, b: &str) -> Result<&Self, HarnessError> {
        if shape_analysis::entities_intersect(&self.scene, self.entity(a)?, self.entity(b)?) {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("[{a}/{b}] expected intersecting bounds"),
            })
        }
    }

    /// Assert two placed containers' world bounds stay apart.
    pub fn assert_clear(&self, a: &str, b: &str) -> Result<&Self, HarnessError> {
        if shape_analysis::entities_intersect(&self.scene, self.entity(a)?, self.entity(b)?) {
            Err(HarnessError::AssertionFailed {
                detail: format!("[{a}/{b}] expected separated bounds"),
            })
        } else {
            Ok(self)
        }
    }

    /// Assert the total number of entities in the scene.
    pub fn assert_entity_count(&self, expected: usize) -> Result<&Self, HarnessError> {
        let actual = self.scene.entity_count();
        if actual == expected {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("expected {expected} entities, got {actual}"),
            })
        }
    }

    // ── Internal Helpers ────────────────────────────────────────────────

    fn check_name_available(&self, name: &str) -> Result<(), HarnessError> {
        if self.named.contains_key(name) {
            Err(HarnessError::DuplicateName {
                name: name.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
