// End-to-end descriptions of loaded worlds in every mode.

use minigrid_text_core::{
    Color, DescribeConfig, DescribeError, DescribeMode, DoorReport, Observation, Orientation,
    Position, SceneContext, annotate, describe,
    world::{GridWorld, WorldObject, load_world_from_string},
};

const TWO_ROOMS: &str = "
    @mission pick up the blue ball
    @room_size 5
    WL WL WL WL WL WL WL WL WL
    WL BL BL BL WL BL AB BL WL
    WL ST KR BL LY BL BL BL WL
    WL BL XP BL WL BL BL BL WL
    WL WL WL WL WL WL WL WL WL
";

fn world() -> GridWorld {
    let mut world = load_world_from_string(TWO_ROOMS).expect("map loads");
    world.carrying = Some(WorldObject::key(Color::Green));
    world
}

fn describe_mode(world: &GridWorld, mode: DescribeMode) -> String {
    match mode {
        DescribeMode::Plain => {
            let observation = world.room_observation().unwrap();
            let context = world.room_context().unwrap();
            describe(&observation, &context, &mode.config()).unwrap()
        }
        DescribeMode::Room | DescribeMode::FullGrid => {
            describe(&world.observation().unwrap(), &world.grid_context(), &mode.config()).unwrap()
        }
    }
}

#[test]
fn room_mode() {
    let text = describe_mode(&world(), DescribeMode::Room);
    assert_eq!(
        text,
        "Mission: pick up the blue ball\n\
         You are facing east.\n\
         There is a locked yellow door leading east.\n\
         There is a red key immediately east of you.\n\
         There is a grey wall immediately west of you.\n\
         You see a red key to your east.\n\
         You see a purple box to your southeast.\n\
         You are carrying a green key."
    );
}

#[test]
fn full_grid_mode_walks_every_room() {
    let text = describe_mode(&world(), DescribeMode::FullGrid);
    assert_eq!(
        text,
        "Mission: pick up the blue ball\n\
         You are facing east.\n\
         There is a locked yellow door to your east.\n\
         There is a red key immediately east of you.\n\
         There is a grey wall immediately west of you.\n\
         You see a blue ball to your northeast.\n\
         You see a red key to your east.\n\
         You see a purple box to your southeast.\n\
         You are carrying a green key."
    );
}

#[test]
fn plain_mode_over_the_room_crop() {
    let text = describe_mode(&world(), DescribeMode::Plain);
    assert_eq!(
        text,
        "You are facing east.\n\
         There is a locked yellow door to your east.\n\
         You see a red key to your east.\n\
         You see a purple box to your southeast.\n\
         You are carrying a green key."
    );
}

#[test]
fn open_and_locked_door_reports_locked() {
    let mut world = world();
    world.grid[Position::new(4, 2)] = Some(WorldObject::door(Color::Yellow, true, true));
    for mode in DescribeMode::ALL {
        let text = describe_mode(&world, mode);
        assert!(text.contains("locked yellow door"), "{mode:?}: {text}");
        assert!(!text.contains("open"), "{mode:?}: {text}");
    }
}

#[test]
fn object_block_skips_background_and_doors() {
    let world = world();
    for mode in DescribeMode::ALL {
        let text = describe_mode(&world, mode);
        for line in text.lines().filter(|line| line.starts_with("You see")) {
            for word in ["wall", "agent", "unseen", "empty", "door"] {
                assert!(!line.contains(word), "{mode:?} mentioned {word}: {line}");
            }
        }
    }
}

#[test]
fn describing_twice_is_identical() {
    let world = world();
    for mode in DescribeMode::ALL {
        assert_eq!(describe_mode(&world, mode), describe_mode(&world, mode));
    }
}

#[test]
fn orientation_follows_the_agent() {
    let mut world = world();
    for (facing, word) in [
        (Orientation::East, "east"),
        (Orientation::South, "south"),
        (Orientation::West, "west"),
        (Orientation::North, "north"),
    ] {
        world.agent_dir = facing;
        let text = describe_mode(&world, DescribeMode::Room);
        assert!(text.contains(&format!("You are facing {word}.")));
    }
}

#[test]
fn agent_in_the_east_room_sees_the_west_door() {
    let mut world = world();
    world.place_agent(Position::new(5, 2), Orientation::West).unwrap();
    let text = describe_mode(&world, DescribeMode::Room);
    assert!(text.contains("There is a locked yellow door leading west."));
    assert!(text.contains("You see a blue ball to your northeast."));
    assert!(!text.contains("red key"));
}

#[test]
fn room_scope_reports_door_cells() {
    let world = world();
    let config = DescribeConfig {
        doors: DoorReport::Cells,
        ..DescribeConfig::room()
    };
    let text = world.describe(&config).unwrap();
    assert_eq!(
        text,
        "Mission: pick up the blue ball\n\
         You are facing east.\n\
         There is a locked yellow door to your east.\n\
         There is a red key immediately east of you.\n\
         There is a grey wall immediately west of you.\n\
         You see a red key to your east.\n\
         You see a purple box to your southeast.\n\
         You are carrying a green key."
    );
}

#[test]
fn broken_door_slot_is_malformed() {
    let mut world = world();
    world.rooms[0].doors[Orientation::South.index()] = Some(Position::new(2, 4));
    let result = describe(&world.observation().unwrap(), &world.grid_context(), &DescribeConfig::room());
    assert!(matches!(result, Err(DescribeError::MalformedObservation(_))));
}

#[test]
fn plain_window_with_a_key_to_the_east() {
    let observation = Observation::from_rows(
        vec![
            vec![[1, 0, 0], [1, 0, 0], [1, 0, 0]],
            vec![[1, 0, 0], [10, 0, 0], [5, 0, 0]],
            vec![[1, 0, 0], [1, 0, 0], [1, 0, 0]],
        ],
        0,
        None,
    )
    .unwrap();
    let text = describe(&observation, &SceneContext::at(Position::new(1, 1)), &DescribeConfig::plain()).unwrap();
    assert!(text.contains("red key to your east"));
    assert!(text.contains("facing east"));
    assert!(!text.contains("agent"));
    assert!(!text.contains("wall"));
}

#[test]
fn text_observation_serializes_alongside_original_fields() {
    let world = world();
    let annotated = annotate(
        world.room_observation().unwrap(),
        &world.room_context().unwrap(),
        &DescribeConfig::plain(),
    )
    .unwrap();
    let json = serde_json::to_value(&annotated).unwrap();
    assert_eq!(json["direction"], 0);
    assert_eq!(json["mission"], "pick up the blue ball");
    assert_eq!(json["image"]["width"], 5);
    assert_eq!(json["image"]["cells"][0], serde_json::json!([2, 5, 0]));
    assert!(json["text"].as_str().unwrap().contains("purple box"));
}
