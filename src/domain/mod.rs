// Domain layer: models, ports and the pure rules (team names, injury classes, game time).

pub mod game_time;
pub mod injury;
pub mod model;
pub mod ports;
pub mod teams;
