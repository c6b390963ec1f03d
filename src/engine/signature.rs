use crate::client::{InstanceKind, Location};

/// Identity of "where the player currently is". Equal signatures mean the
/// player has not actually relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSignature {
    World,
    Instance {
        kind: InstanceKind,
        map_id: u64,
        difficulty_id: u32,
    },
}

impl LocationSignature {
    pub fn of(location: &Location) -> Self {
        if !location.in_instance || location.kind == InstanceKind::None {
            return LocationSignature::World;
        }

        LocationSignature::Instance {
            kind: location.kind,
            map_id: location.map_id,
            difficulty_id: location.difficulty_id,
        }
    }

    pub fn is_instance(self) -> bool {
        matches!(self, LocationSignature::Instance { .. })
    }

    pub fn label(self) -> String {
        match self {
            LocationSignature::World => "world".to_string(),
            LocationSignature::Instance {
                kind,
                map_id,
                difficulty_id,
            } => format!("{}:{}:{}", kind.label(), map_id, difficulty_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignatureTransition {
    Unchanged,
    EnteredInstance,
    LeftInstance,
    SwappedInstance,
}

pub(crate) fn transition_between(
    previous: LocationSignature,
    next: LocationSignature,
) -> SignatureTransition {
    if previous == next {
        return SignatureTransition::Unchanged;
    }

    match (previous.is_instance(), next.is_instance()) {
        (false, true) => SignatureTransition::EnteredInstance,
        (true, false) => SignatureTransition::LeftInstance,
        (true, true) => SignatureTransition::SwappedInstance,
        (false, false) => SignatureTransition::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::{transition_between, LocationSignature, SignatureTransition};
    use crate::client::{InstanceKind, Location};

    #[test]
    fn same_place_produces_equal_signatures() {
        let first = LocationSignature::of(&Location::instance(InstanceKind::Raid, 2657, 15));
        let second = LocationSignature::of(&Location::instance(InstanceKind::Raid, 2657, 15));
        assert_eq!(first, second);
    }

    #[test]
    fn difficulty_change_produces_unequal_signatures() {
        let heroic = LocationSignature::of(&Location::instance(InstanceKind::Raid, 2657, 15));
        let mythic = LocationSignature::of(&Location::instance(InstanceKind::Raid, 2657, 16));
        assert_ne!(heroic, mythic);
        assert_eq!(
            transition_between(heroic, mythic),
            SignatureTransition::SwappedInstance
        );
    }

    #[test]
    fn out_of_instance_locations_collapse_to_world() {
        let outdoors = Location::world();
        let marked_kind = Location {
            in_instance: false,
            kind: InstanceKind::Raid,
            map_id: 2657,
            difficulty_id: 15,
        };
        assert_eq!(LocationSignature::of(&outdoors), LocationSignature::World);
        assert_eq!(
            LocationSignature::of(&marked_kind),
            LocationSignature::World
        );
    }

    #[test]
    fn transition_classification() {
        let world = LocationSignature::World;
        let dungeon = LocationSignature::of(&Location::instance(InstanceKind::Party, 1763, 8));
        let raid = LocationSignature::of(&Location::instance(InstanceKind::Raid, 2657, 15));

        assert_eq!(
            transition_between(world, dungeon),
            SignatureTransition::EnteredInstance
        );
        assert_eq!(
            transition_between(dungeon, world),
            SignatureTransition::LeftInstance
        );
        assert_eq!(
            transition_between(dungeon, raid),
            SignatureTransition::SwappedInstance
        );
        assert_eq!(
            transition_between(raid, raid),
            SignatureTransition::Unchanged
        );
    }
}
