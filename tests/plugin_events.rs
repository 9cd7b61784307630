//! Run the plugin inside a minimal app and move an actor through events
//!

use std::time::Duration;

use bevy::prelude::*;
use bevy_pathfindable_tiles_plugin::prelude::*;

/// Events seen by the app
#[derive(Resource, Default)]
struct Journal {
	/// Actors which began a path
	started: Vec<Entity>,
	/// Actors which ended a path and where
	reached: Vec<(Entity, TileCell)>,
}

/// Copy plugin events into the [Journal]
fn record(
	mut started: EventReader<EventStartedMoving>,
	mut reached: EventReader<EventDestinationReached>,
	mut journal: ResMut<Journal>,
) {
	for event in started.read() {
		journal.started.push(event.entity);
	}
	for event in reached.read() {
		journal.reached.push((event.entity, event.tile));
	}
}

/// App with the plugin, a 10x10 map and one actor
fn setup() -> (App, Entity) {
	let mut app = App::new();
	app.add_plugins(PathfindablePlugin)
		.init_resource::<Time>()
		.init_resource::<Journal>()
		.add_systems(PostUpdate, record);
	let bundle = TileMapBundle::new(10, 10, 16, 16);
	let dimensions = *bundle.get_map_dimensions();
	app.world_mut().spawn(bundle);
	let actor = app
		.world_mut()
		.spawn((
			Pathfindable::new(1, &dimensions, (16, 16), (4.0, 4.0)),
			Transform::default(),
		))
		.id();
	app.world_mut()
		.send_event(EventPlacePathfindable::new(actor, TileCell::new(0, 0)));
	tick(&mut app);
	(app, actor)
}

/// Advance one frame at the nominal rate
fn tick(app: &mut App) {
	app.world_mut()
		.resource_mut::<Time>()
		.advance_by(Duration::from_secs_f64(1.0 / 60.0));
	app.update();
}

/// Owner of a tile in the map
fn get_ref(app: &mut App, tile: TileCell) -> i32 {
	let mut q = app.world_mut().query::<&TileGrid>();
	let grid = q.single(app.world()).unwrap();
	grid.get_ref(tile.get_x(), tile.get_y())
}

#[test]
fn place_claims_tile() {
	let (mut app, _actor) = setup();
	assert_eq!(1, get_ref(&mut app, TileCell::new(0, 0)));
}

#[test]
fn travel_by_event() {
	let (mut app, actor) = setup();
	app.world_mut()
		.send_event(EventSetDestination::new(actor, TileCell::new(4, 2)));
	for _ in 0..200 {
		tick(&mut app);
		if !app.world().resource::<Journal>().reached.is_empty() {
			break;
		}
	}
	let journal = app.world().resource::<Journal>();
	assert_eq!(vec![actor], journal.started);
	assert_eq!(vec![(actor, TileCell::new(4, 2))], journal.reached);
	let pathfindable = app.world().get::<Pathfindable>(actor).unwrap();
	assert!(pathfindable.is_destination_reached());
	let expected = pathfindable.get_world_position();
	let transform = app.world().get::<Transform>(actor).unwrap();
	assert_eq!(expected.x, transform.translation.x);
	assert_eq!(expected.y, transform.translation.y);
	assert_eq!(1, get_ref(&mut app, TileCell::new(4, 2)));
	assert_eq!(0, get_ref(&mut app, TileCell::new(0, 0)));
}

#[test]
fn stop_by_event() {
	let (mut app, actor) = setup();
	app.world_mut()
		.send_event(EventSetDestination::new(actor, TileCell::new(9, 0)));
	tick(&mut app);
	tick(&mut app);
	app.world_mut().send_event(EventStopMoves(actor));
	for _ in 0..200 {
		tick(&mut app);
		if !app.world().resource::<Journal>().reached.is_empty() {
			break;
		}
	}
	let journal = app.world().resource::<Journal>();
	assert_eq!(vec![(actor, TileCell::new(1, 0))], journal.reached);
}

#[test]
fn wall_raised_across_path() {
	let (mut app, actor) = setup();
	app.world_mut()
		.send_event(EventSetDestination::new(actor, TileCell::new(8, 0)));
	tick(&mut app);
	app.world_mut()
		.send_event(EventUpdateTileCost::new(TileCell::new(5, 0), IMPASSABLE_COST));
	tick(&mut app);
	// a fresh search runs once the current step is finished
	let pathfindable = app.world().get::<Pathfindable>(actor).unwrap();
	assert_eq!(MoveState::PendingRecompute, pathfindable.get_state());
	for _ in 0..400 {
		tick(&mut app);
		if !app.world().resource::<Journal>().reached.is_empty() {
			break;
		}
	}
	let journal = app.world().resource::<Journal>();
	assert_eq!(vec![(actor, TileCell::new(8, 0))], journal.reached);
}

#[test]
fn remove_releases_tile() {
	let (mut app, actor) = setup();
	app.world_mut().send_event(EventRemovePathfindable(actor));
	tick(&mut app);
	assert_eq!(0, get_ref(&mut app, TileCell::new(0, 0)));
}

#[test]
fn place_on_taken_tile_is_refused() {
	let (mut app, _actor) = setup();
	let dimensions = MapDimensions::new(10, 10, 16, 16);
	let other = app
		.world_mut()
		.spawn((
			Pathfindable::new(2, &dimensions, (16, 16), (4.0, 4.0)),
			Transform::default(),
		))
		.id();
	app.world_mut()
		.send_event(EventPlacePathfindable::new(other, TileCell::new(0, 0)));
	tick(&mut app);
	assert_eq!(1, get_ref(&mut app, TileCell::new(0, 0)));
	let mut q = app.world_mut().query::<&TileGrid>();
	assert_eq!(0, q.single(app.world()).unwrap().count_refs(2));
}
