use routeplay::prelude::*;

/// End-to-end playback scenarios driven through the public API with
/// synthetic frame timestamps
#[cfg(test)]
mod playback_scenarios {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn controller() -> PlaybackController<RecordingSurface> {
        PlaybackController::new(RecordingSurface::new(), PlaybackOptions::default()).unwrap()
    }

    fn city_path() -> Path {
        Path::new(vec![
            Coordinate::new(-122.4194, 37.7749),
            Coordinate::new(-122.4170, 37.7760),
            Coordinate::new(-122.4170, 37.7760),
            Coordinate::new(-122.4140, 37.7790),
            Coordinate::new(-122.4100, 37.7795),
        ])
        .unwrap()
    }

    /// Ticks at a fixed cadence until the chain stops; returns every update
    /// and the number of ticks taken.
    fn play_out(
        controller: &mut PlaybackController<RecordingSurface>,
        session: SessionId,
    ) -> (Vec<PositionUpdate>, usize) {
        let mut updates = Vec::new();
        let mut ticks = 0;
        let mut now = 0.0;
        loop {
            let outcome = controller.tick(session, now);
            ticks += 1;
            if let Some(update) = outcome.position_update() {
                updates.push(*update);
            }
            if !outcome.should_continue() {
                return (updates, ticks);
            }
            now += FRAME_MS;
            assert!(ticks < 1_000_000, "playback never finished");
        }
    }

    #[test]
    fn test_playback_is_deterministic() {
        let mut first = controller();
        let id = first.start_path(city_path()).unwrap();
        let (a, _) = play_out(&mut first, id);

        let mut second = controller();
        let id = second.start_path(city_path()).unwrap();
        let (b, _) = play_out(&mut second, id);

        assert!(!a.is_empty());
        assert_eq!(a, b);
        assert_eq!(first.surface().commands(), second.surface().commands());
    }

    #[test]
    fn test_doubling_speed_halves_ticks() {
        let mut normal = controller();
        let id = normal.start_path(city_path()).unwrap();
        let (_, slow_ticks) = play_out(&mut normal, id);

        let mut fast = controller();
        fast.set_speed_multiplier(2.0).unwrap();
        let id = fast.start_path(city_path()).unwrap();
        let (_, fast_ticks) = play_out(&mut fast, id);

        let ratio = slow_ticks as f64 / fast_ticks as f64;
        assert!((ratio - 2.0).abs() < 0.05, "ratio {ratio}");
    }

    #[test]
    fn test_positions_progress_along_segments() {
        let mut controller = controller();
        let id = controller.start_path(city_path()).unwrap();
        let (updates, _) = play_out(&mut controller, id);

        for pair in updates.windows(2) {
            assert!(pair[1].segment_index >= pair[0].segment_index);
            assert!(pair[1].distance_traveled > pair[0].distance_traveled);
        }
        for update in &updates {
            assert!((0.0..=1.0).contains(&update.segment_progress));
            assert!((0.0..360.0).contains(&update.heading));
            // The zero-length segment is never reported as the current one
            assert_ne!(update.segment_index, 1);
        }
        assert_eq!(controller.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn test_one_second_north_on_a_degree_of_latitude() {
        let mut controller = controller();
        let id = controller
            .start_coordinates(vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)])
            .unwrap();

        assert_eq!(controller.tick(id, 5_000.0), TickOutcome::WarmUp);
        let update = *controller
            .tick(id, 6_000.0)
            .position_update()
            .expect("second tick advances");

        let expected = 100.0 * 1000.0 / 3600.0;
        assert!((update.distance_traveled - expected).abs() < 1e-9);
        assert!((update.segment_progress - expected / 111_194.93).abs() < 1e-6);
        assert!(update.position.lat > 0.0 && update.position.lat < 1.0);
        assert_eq!(update.position.lng, 0.0);
    }

    #[test]
    fn test_double_cancel_leaves_cancelled() {
        let mut controller = controller();
        let id = controller.start_path(city_path()).unwrap();
        controller.tick(id, 0.0);
        controller.tick(id, 100.0);

        controller.cancel();
        controller.cancel();

        assert_eq!(controller.status(), PlaybackStatus::Cancelled);
        assert!(controller.surface().live_markers().is_empty());
        assert_eq!(controller.tick(id, 200.0), TickOutcome::Stopped);
    }

    #[test]
    fn test_restart_silences_the_old_chain() {
        let mut controller = controller();
        let old = controller.start_path(city_path()).unwrap();
        controller.tick(old, 0.0);
        controller.tick(old, FRAME_MS);

        let new = controller.start().unwrap();
        assert_ne!(old, new);

        let poses_before = controller.surface().marker_trail().len();
        assert_eq!(controller.tick(old, 2.0 * FRAME_MS), TickOutcome::Stopped);
        assert_eq!(controller.surface().marker_trail().len(), poses_before);

        // The new session starts from scratch with its own warm-up
        assert_eq!(controller.tick(new, 2.0 * FRAME_MS), TickOutcome::WarmUp);
        let update = controller.tick(new, 3.0 * FRAME_MS);
        assert_eq!(update.position_update().map(|u| u.session), Some(new));
        assert_eq!(controller.surface().live_markers().len(), 1);
    }

    #[test]
    fn test_pause_keeps_the_vehicle_in_place() {
        let mut controller = controller();
        let id = controller.start_path(city_path()).unwrap();
        controller.tick(id, 0.0);
        controller.tick(id, 1_000.0);
        let before = controller.session().unwrap().distance_traveled();

        assert!(controller.pause());
        for step in 1..=120 {
            assert_eq!(
                controller.tick(id, 1_000.0 + step as f64 * FRAME_MS),
                TickOutcome::Paused
            );
        }
        assert!(controller.resume());
        assert_eq!(controller.tick(id, 60_000.0), TickOutcome::WarmUp);
        assert_eq!(controller.session().unwrap().distance_traveled(), before);
    }

    #[test]
    fn test_channel_surface_receives_the_session() {
        let (surface, commands) = ChannelSurface::unbounded();
        let mut controller = PlaybackController::new(surface, PlaybackOptions::default()).unwrap();
        let id = controller.start_path(city_path()).unwrap();
        controller.tick(id, 0.0);
        controller.tick(id, FRAME_MS);
        controller.cancel();
        drop(controller);

        let received: Vec<SurfaceCommand> = commands.iter().collect();
        assert!(matches!(received.first(), Some(SurfaceCommand::AddMarker { .. })));
        assert!(matches!(received.last(), Some(SurfaceCommand::RemoveMarker { .. })));
        assert!(received
            .iter()
            .any(|c| matches!(c, SurfaceCommand::SetMarkerPose { .. })));
    }
}
