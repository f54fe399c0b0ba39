use std::error::Error;

use fiveaxis::{MachineConfig, Simulation, ToolPath};
use glam::DVec3;

const PATH_SEGMENTS: usize = 500;
const PATH_OFFSET: DVec3 = DVec3::new(1.5, 2.0, 1.0);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "machine.toml".into());
    let tree = MachineConfig::load(&config_path)?.build()?;
    log::info!("loaded machine '{config_path}' with {} axes", tree.len());

    let mut sim = Simulation::new(tree);
    sim.set_tool_path(ToolPath::circle(PATH_SEGMENTS, PATH_OFFSET)?);
    sim.start()?;

    // One full loop around the circular path, reporting the tool
    // carrier's world pose the way a rendering layer would read it.
    let tool = sim
        .tree()
        .find("b_axis")
        .ok_or("machine has no 'b_axis' tool carrier")?;

    for frame in 0..PATH_SEGMENTS {
        sim.tick()?;
        if frame % 50 == 0 {
            let node = sim.tree().node(tool);
            log::info!(
                "step {:3}: tool at [{:+.4} {:+.4} {:+.4}] m, rotation [{:+8.3} {:+8.3} {:+8.3}] deg",
                sim.step_index(),
                node.absolute_translation.x,
                node.absolute_translation.y,
                node.absolute_translation.z,
                node.absolute_rotation.x,
                node.absolute_rotation.y,
                node.absolute_rotation.z,
            );
        }
    }

    let node = sim.tree().node(tool);
    println!(
        "completed {PATH_SEGMENTS} steps; tool carrier at {:?} m",
        node.absolute_translation
    );
    Ok(())
}
