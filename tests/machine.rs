//! End-to-end tests over the public API: build the reference five-joint
//! chain from a declarative config, solve tool-path steps and check the
//! joint values and world poses against independently computed
//! reference values.

use fiveaxis::{
    AxisKind, AxisRole, AxisSpec, IkSolver, MachineConfig, MotionAxis, MovementSpec, SimState,
    Simulation, ToolPath, ToolPathStep,
};
use glam::DVec3;

const EPS: f64 = 1e-9;

/// base → X → Y → Z → A → B, A rotary about world Z and B rotary about
/// world Y, the B stage at (0, 0, 0.8) from A carrying the tool tip at
/// (0, -0.75, 0).
fn reference_chain() -> MachineConfig {
    let joint = |name: &str, parent: &str, kind, axis, role| AxisSpec {
        name: name.into(),
        parent: Some(parent.into()),
        movement: MovementSpec {
            kind,
            axis,
            negative: false,
        },
        role: Some(role),
        ..AxisSpec::base("")
    };

    let mut b = joint(
        "b_axis",
        "a_axis",
        AxisKind::Rotational,
        MotionAxis::Y,
        AxisRole::B,
    );
    b.translation = [0.0, 0.0, 0.8];
    b.tool_end_offset = [0.0, -0.75, 0.0];

    MachineConfig {
        axes: vec![
            AxisSpec::base("base"),
            joint("x_axis", "base", AxisKind::Linear, MotionAxis::X, AxisRole::X),
            joint("y_axis", "x_axis", AxisKind::Linear, MotionAxis::Y, AxisRole::Y),
            joint("z_axis", "y_axis", AxisKind::Linear, MotionAxis::Z, AxisRole::Z),
            joint("a_axis", "z_axis", AxisKind::Rotational, MotionAxis::Z, AxisRole::A),
            b,
        ],
    }
}

fn joint_values(tree: &fiveaxis::KinematicTree) -> [f64; 5] {
    let axes = tree.solver_axes().unwrap();
    [
        tree.node(axes.x).joint_value,
        tree.node(axes.y).joint_value,
        tree.node(axes.z).joint_value,
        tree.node(axes.a).joint_value,
        tree.node(axes.b).joint_value,
    ]
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn vertical_normal_places_the_tool_without_compensation() {
    let mut tree = reference_chain().build().unwrap();
    let solver = IkSolver::new(&tree).unwrap();

    let step = ToolPathStep::new(DVec3::new(500.0, 300.0, 400.0), DVec3::Z);
    solver.solve(&mut tree, &step);
    tree.forward_kinematics();

    let [x, y, z, a, b] = joint_values(&tree);
    assert_close(a, 0.0);
    assert_close(b, 0.0);
    assert_close(x, 0.5);
    assert_close(y, 0.3);
    assert_close(z, 0.4);

    // With no rotation the carriages stack straight up to the B stage.
    let b_node = tree.node(tree.solver_axes().unwrap().b);
    assert!((b_node.absolute_translation - DVec3::new(0.5, 0.3, 1.2)).length() < EPS);
    assert_eq!(b_node.absolute_rotation, DVec3::ZERO);
}

#[test]
fn sideways_normal_swings_the_tool_and_compensates() {
    let mut tree = reference_chain().build().unwrap();
    let solver = IkSolver::new(&tree).unwrap();

    let step = ToolPathStep::new(DVec3::new(500.0, 300.0, 400.0), DVec3::X);
    solver.solve(&mut tree, &step);

    let [x, y, z, a, b] = joint_values(&tree);
    assert_close(a, 0.0);
    assert_close(b, -90.0);
    assert_close(x, 1.25);
    assert_close(y, 0.3);
    assert_close(z, -0.35);
}

#[test]
fn tilted_normal_matches_the_reference_solution() {
    let mut tree = reference_chain().build().unwrap();
    let solver = IkSolver::new(&tree).unwrap();

    let normal = DVec3::new(1.0, 1.0, 1.0).normalize();
    let step = ToolPathStep::new(DVec3::new(100.0, -200.0, 50.0), normal);
    solver.solve(&mut tree, &step);

    let [x, y, z, a, b] = joint_values(&tree);
    assert_close(a, 315.0);
    assert_close(b, -54.735610317245346);
    assert_close(x, 1.098698126841458);
    assert_close(y, 0.467327276942982);
    assert_close(z, -0.266987298107781);
}

#[test]
fn repeated_solves_are_deterministic() {
    let mut tree = reference_chain().build().unwrap();
    let solver = IkSolver::new(&tree).unwrap();
    let step = ToolPathStep::new(
        DVec3::new(12.0, 34.0, 56.0),
        DVec3::new(0.2, -0.3, 0.5).normalize(),
    );

    solver.solve(&mut tree, &step);
    tree.forward_kinematics();
    let first = joint_values(&tree);

    solver.solve(&mut tree, &step);
    tree.forward_kinematics();
    assert_eq!(joint_values(&tree), first);
}

#[test]
fn simulation_drives_a_circular_path_through_the_lifecycle() {
    let mut sim = Simulation::new(reference_chain().build().unwrap());
    sim.set_tool_path(ToolPath::circle(10, DVec3::new(1.5, 2.0, 1.0)).unwrap());
    sim.start().unwrap();
    assert_eq!(sim.state(), SimState::Running);

    // A full loop plus one step lands back on step index 1 with the
    // exact same joint state as the first tick.
    sim.tick().unwrap();
    let first = joint_values(sim.tree());

    for _ in 0..10 {
        sim.tick().unwrap();
    }
    assert_eq!(sim.step_index(), 1);
    assert_eq!(joint_values(sim.tree()), first);
}
