mod command;
mod cue;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
