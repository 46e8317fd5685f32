//! A small persistent world for the demo game.
//!
//! Rooms and things live in `im` ordered maps, so cloning the world for the
//! undo history shares structure instead of copying it.

use im::{OrdMap, OrdSet};

use lantern_engine::{BehaviorSource, EntityBehaviors};
use lantern_foundation::EntityId;

/// Where a thing is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Lying in a room
    Room(EntityId),
    /// Held by the player
    Carried,
}

/// How close the player can get to a thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    /// Within arm's length
    Near,
    /// Visible but out of reach
    Far,
}

/// A location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    /// Short name
    pub name: String,
    /// Full description
    pub description: String,
    exits: OrdMap<String, EntityId>,
}

impl Room {
    /// Exits as `(direction, room)` pairs, in direction order.
    pub fn exits(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.exits.iter().map(|(d, r)| (d.as_str(), *r))
    }
}

/// An object the player can refer to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thing {
    /// Canonical noun it answers to
    pub noun: String,
    /// Canonical adjective it answers to, if any
    pub adjective: Option<String>,
    /// Description shown by examine
    pub description: String,
    /// Extra detail visible only up close
    pub detail: Option<String>,
    /// Where it is
    pub placement: Placement,
    /// How close the player can get
    pub reach: Reach,
    /// Its `on_<verb>` bindings
    pub behaviors: EntityBehaviors,
}

impl Thing {
    /// Creates a near thing, held by the player until placed.
    #[must_use]
    pub fn new(noun: &str, description: &str) -> Self {
        Self {
            noun: noun.to_string(),
            adjective: None,
            description: description.to_string(),
            detail: None,
            placement: Placement::Carried,
            reach: Reach::Near,
            behaviors: EntityBehaviors::new(),
        }
    }

    /// Sets the adjective.
    #[must_use]
    pub fn with_adjective(mut self, adjective: &str) -> Self {
        self.adjective = Some(adjective.to_string());
        self
    }

    /// Sets the close-up detail.
    #[must_use]
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    /// Places the thing in a room.
    #[must_use]
    pub fn in_room(mut self, room: EntityId) -> Self {
        self.placement = Placement::Room(room);
        self
    }

    /// Marks the thing out of reach.
    #[must_use]
    pub fn far(mut self) -> Self {
        self.reach = Reach::Far;
        self
    }

    /// Binds an entity event.
    #[must_use]
    pub fn with_behavior(mut self, event: &str, reference: &str) -> Self {
        self.behaviors.insert(event, reference);
        self
    }

    /// "rusty sword", or just "sword".
    #[must_use]
    pub fn name(&self) -> String {
        match &self.adjective {
            Some(adjective) => format!("{adjective} {}", self.noun),
            None => self.noun.clone(),
        }
    }
}

/// The demo world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DemoWorld {
    rooms: OrdMap<EntityId, Room>,
    things: OrdMap<EntityId, Thing>,
    flags: OrdSet<String>,
    player_room: Option<EntityId>,
    next_index: u64,
}

impl DemoWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> EntityId {
        self.next_index += 1;
        EntityId::new(self.next_index)
    }

    /// Adds a room. The first room added is where the player starts.
    pub fn add_room(&mut self, name: &str, description: &str) -> EntityId {
        let id = self.allocate();
        self.rooms.insert(
            id,
            Room {
                name: name.to_string(),
                description: description.to_string(),
                exits: OrdMap::new(),
            },
        );
        self.player_room.get_or_insert(id);
        id
    }

    /// Adds a one-way exit.
    pub fn connect(&mut self, from: EntityId, direction: &str, to: EntityId) {
        if let Some(room) = self.rooms.get_mut(&from) {
            room.exits.insert(direction.to_string(), to);
        }
    }

    /// Adds a thing.
    pub fn add_thing(&mut self, thing: Thing) -> EntityId {
        let id = self.allocate();
        self.things.insert(id, thing);
        id
    }

    /// Looks up a room.
    #[must_use]
    pub fn room(&self, id: EntityId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Finds a room by name.
    #[must_use]
    pub fn room_named(&self, name: &str) -> Option<EntityId> {
        self.rooms
            .iter()
            .find(|(_, room)| room.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    /// The player's room.
    #[must_use]
    pub fn player_room(&self) -> Option<EntityId> {
        self.player_room
    }

    /// Moves the player.
    pub fn move_player(&mut self, to: EntityId) {
        if self.rooms.contains_key(&to) {
            self.player_room = Some(to);
        }
    }

    /// Where an exit from the player's room leads.
    #[must_use]
    pub fn exit(&self, direction: &str) -> Option<EntityId> {
        let room = self.room(self.player_room?)?;
        room.exits.get(direction).copied()
    }

    /// Looks up a thing.
    #[must_use]
    pub fn thing(&self, id: EntityId) -> Option<&Thing> {
        self.things.get(&id)
    }

    /// Moves a thing into the player's hands.
    pub fn carry(&mut self, id: EntityId) {
        if let Some(thing) = self.things.get_mut(&id) {
            thing.placement = Placement::Carried;
        }
    }

    /// Puts a thing down in the player's room.
    pub fn put_down(&mut self, id: EntityId) {
        let Some(room) = self.player_room else {
            return;
        };
        if let Some(thing) = self.things.get_mut(&id) {
            thing.placement = Placement::Room(room);
        }
    }

    /// Things the player is holding.
    #[must_use]
    pub fn carried(&self) -> Vec<EntityId> {
        self.things
            .iter()
            .filter(|(_, t)| t.placement == Placement::Carried)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Things lying in the player's room.
    #[must_use]
    pub fn things_here(&self) -> Vec<EntityId> {
        let Some(room) = self.player_room else {
            return Vec::new();
        };
        self.things
            .iter()
            .filter(|(_, t)| t.placement == Placement::Room(room))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Finds a visible thing by canonical noun and optional adjective.
    ///
    /// Held things are preferred over things in the room.
    #[must_use]
    pub fn find(&self, noun: &str, adjective: Option<&str>) -> Option<EntityId> {
        let matches = |id: &EntityId| {
            self.thing(*id).is_some_and(|t| {
                t.noun == noun && adjective.is_none_or(|a| t.adjective.as_deref() == Some(a))
            })
        };
        self.carried()
            .into_iter()
            .chain(self.things_here())
            .find(matches)
    }

    /// Sets a story flag.
    pub fn set_flag(&mut self, flag: &str) {
        self.flags.insert(flag.to_string());
    }

    /// Checks a story flag.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Describes a room: name, description, visible things, exits.
    #[must_use]
    pub fn describe_room(&self, id: EntityId) -> String {
        let Some(room) = self.room(id) else {
            return "You are nowhere.".to_string();
        };
        let mut text = format!("{}\n{}", room.name, room.description);

        let things: Vec<String> = self
            .things
            .values()
            .filter(|t| t.placement == Placement::Room(id))
            .map(|t| format!("a {}", t.name()))
            .collect();
        if !things.is_empty() {
            text.push_str(&format!("\nYou see {}.", things.join(", ")));
        }

        let exits: Vec<&str> = room.exits().map(|(d, _)| d).collect();
        if !exits.is_empty() {
            text.push_str(&format!("\nExits: {}.", exits.join(", ")));
        }
        text
    }

    /// Describes the player's room.
    #[must_use]
    pub fn describe_here(&self) -> String {
        match self.player_room {
            Some(id) => self.describe_room(id),
            None => "You are nowhere.".to_string(),
        }
    }
}

impl BehaviorSource for DemoWorld {
    fn behaviors(&self, entity: EntityId) -> Option<&EntityBehaviors> {
        self.things.get(&entity).map(|t| &t.behaviors)
    }
}
