use glam::{Quat, Vec3};
use xr_walkthrough::core::ControllerInput;
use xr_walkthrough::math::Aabb;
use xr_walkthrough::{advance, ObstacleSet, Shape, ViewerRig};

const CLEARANCE: f32 = 1.5;

/// Upright panel facing +Z, centred `distance` ahead of the origin.
fn wall_ahead(distance: f32) -> ObstacleSet {
    let mut set = ObstacleSet::new();
    set.add(
        "ahead",
        Shape::Panel {
            center: Vec3::new(0.0, 1.0, -distance),
            rotation: Quat::IDENTITY,
            width: 4.0,
            height: 4.0,
        },
    );
    set
}

/// Upright panel facing along X at `x`, spanning the floor-level rays.
fn wall_beside(x: f32) -> ObstacleSet {
    let mut set = ObstacleSet::new();
    set.add(
        "beside",
        Shape::Panel {
            center: Vec3::new(x, 1.0, 0.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            width: 10.0,
            height: 4.0,
        },
    );
    set
}

#[cfg(test)]
mod idle_tests {
    use super::*;

    #[test]
    fn test_released_select_is_bit_identical() {
        let obstacles = wall_ahead(1.0);
        let mut rig = ViewerRig {
            position: Vec3::new(0.3, 0.2, -0.1),
            orientation: Quat::from_rotation_y(0.7),
            head: Quat::from_rotation_x(-0.2),
        };
        let before = rig;

        for _ in 0..10 {
            advance(&mut rig, &obstacles, &ControllerInput::RELEASED, 0.016, CLEARANCE);
        }

        assert_eq!(rig.position.to_array(), before.position.to_array());
        assert_eq!(rig.orientation.to_array(), before.orientation.to_array());
        assert_eq!(rig.head, before.head);
    }
}

#[cfg(test)]
mod open_space_tests {
    use super::*;

    #[test]
    fn test_moves_forward_by_dt_times_speed() {
        let obstacles = ObstacleSet::new();
        let mut rig = ViewerRig::new(Vec3::new(0.0, 0.0, 5.0));
        let dt = 0.1;

        let mut last_z = rig.position.z;
        for i in 1..=20 {
            let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, dt, CLEARANCE);
            assert!(step.moved && !step.blocked);
            assert!(rig.position.z < last_z, "step {} did not advance", i);
            assert!((last_z - rig.position.z - dt * 2.0).abs() < 1e-5);
            assert_eq!(rig.position.y, 0.0);
            last_z = rig.position.z;
        }
        assert!((rig.position.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut rig = ViewerRig::new(Vec3::new(2.0, 0.0, 2.0));
        advance(&mut rig, &ObstacleSet::new(), &ControllerInput::PRESSED, 0.0, CLEARANCE);
        assert_eq!(rig.position, Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn test_raised_rig_lands_on_floor() {
        let mut rig = ViewerRig::new(Vec3::new(0.0, 1.7, 0.0));
        advance(&mut rig, &ObstacleSet::new(), &ControllerInput::PRESSED, 0.1, CLEARANCE);
        assert_eq!(rig.position.y, 0.0);
    }
}

#[cfg(test)]
mod collision_tests {
    use super::*;

    #[test]
    fn test_forward_obstacle_inside_clearance_blocks() {
        let obstacles = wall_ahead(1.0);
        let mut rig = ViewerRig::new(Vec3::ZERO);

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.1, CLEARANCE);

        assert!(step.blocked);
        assert_eq!(rig.position.z, 0.0);
    }

    #[test]
    fn test_forward_obstacle_beyond_clearance_allows_move() {
        let obstacles = wall_ahead(3.0);
        let mut rig = ViewerRig::new(Vec3::ZERO);

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.1, CLEARANCE);

        assert!(!step.blocked);
        assert!((rig.position.z + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_left_obstacle_pushes_by_clearance_deficit() {
        let obstacles = wall_beside(-0.5);
        let mut rig = ViewerRig::new(Vec3::ZERO);

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.1, CLEARANCE);

        let push = step.left_push.expect("left wall should be detected");
        assert!((push - 1.0).abs() < 1e-5);
        assert!((rig.position.x - 1.0).abs() < 1e-5);
        assert!(step.right_push.is_none());
    }

    #[test]
    fn test_right_obstacle_pushes_back_by_clearance_deficit() {
        let obstacles = wall_beside(0.5);
        let mut rig = ViewerRig::new(Vec3::ZERO);

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.1, CLEARANCE);

        let push = step.right_push.expect("right wall should be detected");
        assert!((push + 1.0).abs() < 1e-5);
        assert!((rig.position.x + 1.0).abs() < 1e-5);
        assert!(step.left_push.is_none());
    }

    #[test]
    fn test_narrow_corridor_corrects_both_sides() {
        let mut obstacles = wall_beside(-0.5);
        obstacles.add(
            "right",
            Shape::Panel {
                center: Vec3::new(1.0, 1.0, 0.0),
                rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                width: 10.0,
                height: 4.0,
            },
        );
        let mut rig = ViewerRig::new(Vec3::ZERO);

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.0, CLEARANCE);

        // +1.0 from the left wall, then -0.5 from the right wall
        assert_eq!(step.left_push.map(|p| (p * 1e4).round()), Some(1e4));
        assert_eq!(step.right_push.map(|p| (p * 1e4).round()), Some(-0.5e4));
        assert!((rig.position.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_inside_room_walls_push_inward() {
        let mut obstacles = ObstacleSet::new();
        obstacles.add(
            "room",
            Shape::Room(Aabb::from_center_size(
                Vec3::new(0.0, 4.5, 0.0),
                Vec3::new(30.0, 10.0, 30.0),
            )),
        );
        let mut rig = ViewerRig::new(Vec3::new(-14.5, 0.0, 0.0));

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.0, CLEARANCE);

        assert!((step.left_push.unwrap() - 1.0).abs() < 1e-4);
        assert!((rig.position.x + 13.5).abs() < 1e-4);
    }

    #[test]
    fn test_diagonal_obstacle_is_not_guarded() {
        // Box sits diagonally ahead-left; none of the three rays see it
        let mut obstacles = ObstacleSet::new();
        obstacles.add(
            "pillar",
            Shape::Block(Aabb::from_center_size(
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::splat(0.5),
            )),
        );
        let mut rig = ViewerRig::new(Vec3::ZERO);

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.1, CLEARANCE);

        assert!(!step.blocked);
        assert!(step.left_push.is_none() && step.right_push.is_none());
    }
}

#[cfg(test)]
mod orientation_tests {
    use super::*;

    fn rig_with_pose() -> ViewerRig {
        ViewerRig {
            position: Vec3::ZERO,
            orientation: Quat::from_rotation_y(0.25),
            head: Quat::from_rotation_y(-0.6),
        }
    }

    #[test]
    fn test_orientation_restored_when_blocked() {
        let mut obstacles = ObstacleSet::new();
        obstacles.add(
            "room",
            Shape::Room(Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 4.0, 2.0))),
        );
        let mut rig = rig_with_pose();
        let before = rig.orientation;

        let step = advance(&mut rig, &obstacles, &ControllerInput::PRESSED, 0.1, CLEARANCE);

        assert!(step.blocked);
        assert!(step.left_push.is_some() && step.right_push.is_some());
        assert_eq!(rig.orientation, before);
    }

    #[test]
    fn test_orientation_restored_in_open_space() {
        let mut rig = rig_with_pose();
        let before = rig.orientation;

        advance(&mut rig, &ObstacleSet::new(), &ControllerInput::PRESSED, 0.1, CLEARANCE);

        assert_eq!(rig.orientation, before);
    }

    #[test]
    fn test_walks_along_combined_aim() {
        let mut rig = rig_with_pose();
        let aim = rig.aim_orientation();

        advance(&mut rig, &ObstacleSet::new(), &ControllerInput::PRESSED, 0.5, CLEARANCE);

        let expected = aim * Vec3::NEG_Z;
        assert!((rig.position - expected).length() < 1e-5);
    }
}
