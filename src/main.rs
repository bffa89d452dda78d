// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

use bevy::prelude::*;
use clap::Parser;
use snake3d::autopilot::Autopilot;
use snake3d::{cmdline::Args, AppPlugin};


fn main() -> AppExit {
    let args = Args::parse();
    let settings = match args.settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return AppExit::error();
        }
    };
    if args.sim {
        let mut autopilot = Autopilot::new(settings.rules());
        match autopilot.run_x_games(args.games) {
            Ok(_) => AppExit::Success,
            Err(err) => {
                eprintln!("{err}");
                AppExit::error()
            }
        }
    } else {
        App::new()
            .add_plugins(AppPlugin {
                settings,
                quick_start: args.quick_start(),
            })
            .run()
    }
}
