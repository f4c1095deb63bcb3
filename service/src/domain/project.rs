//! [`Project`] definitions.

use common::{define_kind, Feet, SquareFeet};

use super::{
    add_on::{self, AddOn},
    quote::{self, Breakdown},
    room::{self, Room},
    Analysis, Material,
};

/// Flooring project being quoted for a customer.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    /// [`Flow`] the customer describes this [`Project`] with.
    pub flow: Flow,

    /// [`Room`]s measured by the customer in the [`Flow::Manual`].
    rooms: Vec<Room>,

    /// Selected [`Material`], if any.
    material: Option<&'static Material>,

    /// Offered [`AddOn`]s along with their selection.
    add_ons: Vec<AddOn>,

    /// Latest [`Analysis`] of a room photo in the [`Flow::Ai`].
    analysis: Option<Analysis>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            flow: Flow::Manual,
            rooms: vec![],
            material: None,
            add_ons: add_on::defaults(),
            analysis: None,
        }
    }
}

impl Project {
    /// Creates a new empty [`Project`] in the provided [`Flow`].
    #[must_use]
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            ..Self::default()
        }
    }

    /// Returns the [`Room`]s of this [`Project`].
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Adds a new [`Room`] to this [`Project`], returning its ID.
    pub fn add_room(
        &mut self,
        name: room::Name,
        length: Feet,
        width: Feet,
    ) -> room::Id {
        let room = Room::new(name, length, width);
        let id = room.id;
        self.rooms.push(room);
        id
    }

    /// Updates the provided fields of the [`Room`] with the provided ID.
    ///
    /// Returns `false` if there is no such [`Room`].
    pub fn update_room(
        &mut self,
        id: room::Id,
        name: Option<room::Name>,
        length: Option<Feet>,
        width: Option<Feet>,
    ) -> bool {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if let Some(name) = name {
            room.name = name;
        }
        room.resize(length, width);
        true
    }

    /// Removes the [`Room`] with the provided ID.
    ///
    /// Returns `false` if there is no such [`Room`].
    pub fn remove_room(&mut self, id: room::Id) -> bool {
        let len = self.rooms.len();
        self.rooms.retain(|r| r.id != id);
        self.rooms.len() != len
    }

    /// Returns the total floor area of the measured [`Room`]s.
    #[must_use]
    pub fn total_area(&self) -> SquareFeet {
        quote::total_area(&self.rooms)
    }

    /// Returns the selected [`Material`], if any.
    #[must_use]
    pub fn material(&self) -> Option<&'static Material> {
        self.material
    }

    /// Selects the provided [`Material`], or clears the selection.
    pub fn select_material(&mut self, material: Option<&'static Material>) {
        self.material = material;
    }

    /// Returns the offered [`AddOn`]s.
    #[must_use]
    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    /// Flips the selection of the [`AddOn`] with the provided ID.
    ///
    /// Returns `false` if there is no such [`AddOn`].
    pub fn toggle_add_on(&mut self, id: &add_on::Id) -> bool {
        self.add_ons
            .iter_mut()
            .find(|a| a.id == *id)
            .map(AddOn::toggle)
            .is_some()
    }

    /// Returns the latest [`Analysis`], if any.
    #[must_use]
    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    /// Sets the latest [`Analysis`] of a room photo.
    pub fn set_analysis(&mut self, analysis: Option<Analysis>) {
        self.analysis = analysis;
    }

    /// Returns the floor area this [`Project`] is quoted for.
    ///
    /// In the [`Flow::Ai`] it's the area of the latest [`Analysis`] (zero if
    /// there is none yet), otherwise it's the [`Project::total_area()`].
    #[must_use]
    pub fn area(&self) -> SquareFeet {
        match self.flow {
            Flow::Manual => self.total_area(),
            Flow::Ai => self
                .analysis
                .as_ref()
                .map_or(SquareFeet::ZERO, |a| a.estimate.area()),
        }
    }

    /// Computes the quote [`Breakdown`] of this [`Project`].
    #[must_use]
    pub fn quote(&self) -> Breakdown {
        Breakdown::compute(self.area(), self.material, &self.add_ons)
    }

    /// Resets this [`Project`] to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Abandons the [`Flow::Ai`], dropping its [`Analysis`] along with the
    /// [`Material`] and [`AddOn`]s selection, and returns to the
    /// [`Flow::Manual`].
    ///
    /// Measured [`Room`]s are kept.
    pub fn reset_ai_flow(&mut self) {
        self.flow = Flow::Manual;
        self.analysis = None;
        self.material = None;
        self.add_ons = add_on::defaults();
    }
}

define_kind! {
    #[doc = "Way a [`Project`] is described by a customer."]
    enum Flow {
        #[doc = "Rooms are measured manually."]
        Manual = 1,

        #[doc = "A single room is estimated from a photo."]
        Ai = 2,
    }
}
