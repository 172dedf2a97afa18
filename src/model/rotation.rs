//! Rotation group and per-tile rotation behavior
//!
//! Rotations act in the xy plane and are parameterized by the group size:
//! `rotational_symmetry` of 1, 2, or 4 combined with an optional reflection.
//! A rotation reflects about the x axis first and then rotates
//! counter-clockwise; compositions and inverses follow from that order.

use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::model::tiles::{Tile, TileValue};
use std::collections::HashMap;
use std::fmt;

/// One element of the rotation/reflection group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    /// Counter-clockwise angle in degrees
    pub angle: u16,
    /// Whether to reflect about the x axis before rotating
    pub reflect_x: bool,
}

impl Rotation {
    /// Create a rotation, normalizing the angle into [0, 360)
    pub const fn new(angle: u16, reflect_x: bool) -> Self {
        Self {
            angle: angle % 360,
            reflect_x,
        }
    }

    /// The identity element
    pub const fn identity() -> Self {
        Self {
            angle: 0,
            reflect_x: false,
        }
    }

    /// Whether this is the identity element
    pub const fn is_identity(self) -> bool {
        self.angle == 0 && !self.reflect_x
    }

    /// Composition: apply `self` first, then `next`
    pub const fn then(self, next: Self) -> Self {
        let angle = if next.reflect_x {
            (next.angle + 360 - self.angle) % 360
        } else {
            (next.angle + self.angle) % 360
        };
        Self {
            angle,
            reflect_x: self.reflect_x ^ next.reflect_x,
        }
    }

    /// The group inverse
    ///
    /// Reflections are involutions; pure rotations invert their angle.
    pub const fn inverse(self) -> Self {
        if self.reflect_x {
            self
        } else {
            Self {
                angle: (360 - self.angle) % 360,
                reflect_x: false,
            }
        }
    }

    /// Apply the rotation to an integer xy offset
    pub const fn transform_offset(self, offset: [i32; 2]) -> [i32; 2] {
        let x = if self.reflect_x { -offset[0] } else { offset[0] };
        let y = offset[1];
        match self.angle {
            90 => [-y, x],
            180 => [-x, -y],
            270 => [y, -x],
            _ => [x, y],
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}{}", self.angle, if self.reflect_x { "x" } else { "" })
    }
}

/// The finite group of rotations available to a model
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationGroup {
    rotational_symmetry: usize,
    reflectional_symmetry: bool,
}

impl RotationGroup {
    /// Create a group from its symmetry parameters
    ///
    /// # Errors
    ///
    /// Returns an error unless the rotational symmetry is 1, 2, or 4
    pub fn new(rotational_symmetry: usize, reflectional_symmetry: bool) -> Result<Self> {
        if !matches!(rotational_symmetry, 1 | 2 | 4) {
            return Err(invalid_parameter(
                "rotational_symmetry",
                &rotational_symmetry,
                &"must be 1, 2, or 4",
            ));
        }
        Ok(Self {
            rotational_symmetry,
            reflectional_symmetry,
        })
    }

    /// The trivial group containing only the identity
    pub const fn trivial() -> Self {
        Self {
            rotational_symmetry: 1,
            reflectional_symmetry: false,
        }
    }

    /// Rotational symmetry parameter (1, 2, or 4)
    pub const fn rotational_symmetry(&self) -> usize {
        self.rotational_symmetry
    }

    /// Whether reflections are members of the group
    pub const fn reflectional_symmetry(&self) -> bool {
        self.reflectional_symmetry
    }

    /// The smallest non-trivial angle, in degrees
    pub const fn smallest_angle(&self) -> u16 {
        (360 / self.rotational_symmetry) as u16
    }

    /// Number of elements (1, 2, 4, or 8)
    pub const fn size(&self) -> usize {
        if self.reflectional_symmetry {
            self.rotational_symmetry * 2
        } else {
            self.rotational_symmetry
        }
    }

    /// Whether a rotation is an element of this group
    pub const fn contains(&self, rotation: Rotation) -> bool {
        let angle_ok = rotation.angle % self.smallest_angle() == 0;
        angle_ok && (!rotation.reflect_x || self.reflectional_symmetry)
    }

    /// All group elements, identity first
    pub fn elements(&self) -> Vec<Rotation> {
        let mut elements = Vec::with_capacity(self.size());
        let reflections: &[bool] = if self.reflectional_symmetry {
            &[false, true]
        } else {
            &[false]
        };
        for &reflect_x in reflections {
            for step in 0..self.rotational_symmetry {
                elements.push(Rotation::new(step as u16 * self.smallest_angle(), reflect_x));
            }
        }
        elements
    }
}

/// What to do when a tile has no declared transform under a rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TileRotationTreatment {
    /// The tile maps to itself (fully symmetric tiles)
    #[default]
    Unchanged,
    /// The transform fails; rotation-dependent operations drop the tile
    Missing,
    /// Synthesize a `Tile::Rotated` value carrying the rotation
    Generated,
}

/// Partial map from (tile, rotation) to tiles, with fallback treatments
#[derive(Clone, Debug)]
pub struct TileRotation<V> {
    group: RotationGroup,
    transforms: HashMap<(Tile<V>, Rotation), Tile<V>>,
    treatments: HashMap<Tile<V>, TileRotationTreatment>,
    default_treatment: TileRotationTreatment,
}

impl<V: TileValue> TileRotation<V> {
    /// A rotation map that treats every tile as fully symmetric
    pub fn unchanged(group: RotationGroup) -> Self {
        Self {
            group,
            transforms: HashMap::new(),
            treatments: HashMap::new(),
            default_treatment: TileRotationTreatment::Unchanged,
        }
    }

    /// The group this map is defined over
    pub const fn group(&self) -> RotationGroup {
        self.group
    }

    /// Effective treatment for a tile
    ///
    /// Synthetic rotated tiles inherit the treatment of their base atom when
    /// they have no override of their own.
    pub fn treatment(&self, tile: &Tile<V>) -> TileRotationTreatment {
        if let Some(&treatment) = self.treatments.get(tile) {
            return treatment;
        }
        if let Tile::Rotated { value, .. } = tile {
            if let Some(&treatment) = self.treatments.get(&Tile::Atom(value.clone())) {
                return treatment;
            }
        }
        self.default_treatment
    }

    /// Transform a tile under a rotation
    ///
    /// Consults the declared map first, then falls back to the tile's
    /// treatment. Returns `None` exactly when the treatment is `Missing` and
    /// no transform was declared.
    pub fn rotate(&self, tile: &Tile<V>, rotation: Rotation) -> Option<Tile<V>> {
        if rotation.is_identity() {
            return Some(tile.clone());
        }
        if let Some(dest) = self.transforms.get(&(tile.clone(), rotation)) {
            return Some(dest.clone());
        }
        match self.treatment(tile) {
            TileRotationTreatment::Unchanged => Some(tile.clone()),
            TileRotationTreatment::Missing => None,
            TileRotationTreatment::Generated => Some(self.generate(tile, rotation)),
        }
    }

    /// Collapse a rotated tile to its representative under the group
    ///
    /// Atoms are already canonical. A rotated tile canonicalizes through the
    /// rotation of its base atom, so a declared transform or an identity
    /// composition folds it back into the palette.
    pub fn canonical(&self, tile: &Tile<V>) -> Option<Tile<V>> {
        match tile {
            Tile::Atom(_) => Some(tile.clone()),
            Tile::Rotated { value, rotation } => {
                self.rotate(&Tile::Atom(value.clone()), *rotation)
            }
        }
    }

    fn generate(&self, tile: &Tile<V>, rotation: Rotation) -> Tile<V> {
        match tile {
            Tile::Atom(value) => Tile::Rotated {
                value: value.clone(),
                rotation,
            },
            Tile::Rotated { value, rotation: applied } => {
                let composed = applied.then(rotation);
                if composed.is_identity() {
                    return Tile::Atom(value.clone());
                }
                let base = Tile::Atom(value.clone());
                if let Some(dest) = self.transforms.get(&(base, composed)) {
                    return dest.clone();
                }
                Tile::Rotated {
                    value: value.clone(),
                    rotation: composed,
                }
            }
        }
    }
}

/// Builder assembling a [`TileRotation`] from per-tile declarations
///
/// Declarations are closed under composition and inversion at build time, so
/// declaring a single clockwise rotation step is enough to derive the rest
/// of a tile's orbit.
#[derive(Clone, Debug)]
pub struct TileRotationBuilder<V> {
    group: RotationGroup,
    default_treatment: TileRotationTreatment,
    transforms: HashMap<(Tile<V>, Rotation), Tile<V>>,
    treatments: HashMap<Tile<V>, TileRotationTreatment>,
}

impl<V: TileValue> TileRotationBuilder<V> {
    /// Start a builder over a group with a default treatment
    pub fn new(group: RotationGroup, default_treatment: TileRotationTreatment) -> Self {
        Self {
            group,
            default_treatment,
            transforms: HashMap::new(),
            treatments: HashMap::new(),
        }
    }

    /// Override the treatment for one tile
    pub fn set_treatment(&mut self, tile: Tile<V>, treatment: TileRotationTreatment) {
        self.treatments.insert(tile, treatment);
    }

    /// Declare that `src` transforms into `dest` under `rotation`
    ///
    /// The inverse transform is declared automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the rotation is not a group element, if the
    /// rotation is the identity, or if a conflicting transform exists.
    pub fn add(&mut self, src: Tile<V>, rotation: Rotation, dest: Tile<V>) -> Result<()> {
        if rotation.is_identity() {
            return Err(invalid_parameter(
                "rotation",
                &rotation,
                &"identity transforms are implicit",
            ));
        }
        if !self.group.contains(rotation) {
            return Err(invalid_parameter(
                "rotation",
                &rotation,
                &format!("not an element of the {:?} group", self.group),
            ));
        }
        self.insert(src.clone(), rotation, dest.clone())?;
        self.insert(dest, rotation.inverse(), src)
    }

    /// Declare a reflection about the x axis
    ///
    /// # Errors
    ///
    /// Returns an error if the group has no reflections or on conflict
    pub fn reflect_x(&mut self, src: Tile<V>, dest: Tile<V>) -> Result<()> {
        self.add(src, Rotation::new(0, true), dest)
    }

    /// Declare a reflection about the y axis (reflect x, then rotate 180)
    ///
    /// # Errors
    ///
    /// Returns an error if the group has no reflections or on conflict
    pub fn reflect_y(&mut self, src: Tile<V>, dest: Tile<V>) -> Result<()> {
        self.add(src, Rotation::new(180, true), dest)
    }

    /// Declare one clockwise rotation step
    ///
    /// # Errors
    ///
    /// Returns an error if the group has no non-trivial rotations or on conflict
    pub fn rotate_cw(&mut self, src: Tile<V>, dest: Tile<V>) -> Result<()> {
        let smallest = self.group.smallest_angle();
        if smallest == 360 {
            return Err(invalid_parameter(
                "rotation",
                &"cw",
                &"group has no non-trivial rotations",
            ));
        }
        self.add(src, Rotation::new(360 - smallest, false), dest)
    }

    /// Declare one counter-clockwise rotation step
    ///
    /// # Errors
    ///
    /// Returns an error if the group has no non-trivial rotations or on conflict
    pub fn rotate_ccw(&mut self, src: Tile<V>, dest: Tile<V>) -> Result<()> {
        let smallest = self.group.smallest_angle();
        if smallest == 360 {
            return Err(invalid_parameter(
                "rotation",
                &"ccw",
                &"group has no non-trivial rotations",
            ));
        }
        self.add(src, Rotation::new(smallest, false), dest)
    }

    /// Close the declarations under composition and produce the map
    ///
    /// # Errors
    ///
    /// Returns an error if the closure derives two different images for the
    /// same (tile, rotation) pair
    pub fn build(mut self) -> Result<TileRotation<V>> {
        loop {
            let mut derived = Vec::new();
            for ((t1, r1), t2) in &self.transforms {
                for ((t2b, r2), t3) in &self.transforms {
                    if t2b != t2 {
                        continue;
                    }
                    let composed = r1.then(*r2);
                    if composed.is_identity() {
                        if t1 != t3 {
                            return Err(SolverError::ConflictingTransform {
                                tile: format!("{t1:?}"),
                                rotation: format!("{composed}"),
                            });
                        }
                        continue;
                    }
                    if !self.transforms.contains_key(&(t1.clone(), composed)) {
                        derived.push((t1.clone(), composed, t3.clone()));
                    }
                }
            }
            if derived.is_empty() {
                break;
            }
            for (src, rotation, dest) in derived {
                self.insert(src, rotation, dest)?;
            }
        }

        Ok(TileRotation {
            group: self.group,
            transforms: self.transforms,
            treatments: self.treatments,
            default_treatment: self.default_treatment,
        })
    }

    fn insert(&mut self, src: Tile<V>, rotation: Rotation, dest: Tile<V>) -> Result<()> {
        match self.transforms.get(&(src.clone(), rotation)) {
            Some(existing) if *existing != dest => Err(SolverError::ConflictingTransform {
                tile: format!("{src:?}"),
                rotation: format!("{rotation}"),
            }),
            Some(_) => Ok(()),
            None => {
                self.transforms.insert((src, rotation), dest);
                Ok(())
            }
        }
    }
}
