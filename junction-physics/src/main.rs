use junction_physics::app::run;

fn main() -> color_eyre::Result<()> {
    run()
}
