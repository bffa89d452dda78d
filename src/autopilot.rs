use crate::snake_game::{
    Difficulty, GameEvent, GameKey, InputEvent, MapKind, Phase, Rules, Session, SessionError,
    SnakeGame,
};
use bevy::math::Vec3;

/// Steps to look ahead when checking whether a heading runs into a wall.
const WALL_LOOKAHEAD: f32 = 50.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct GameSummary {
    pub moves: usize,
    pub apples: usize,
    pub length: usize,
    pub crashed: bool,
}

/// Plays the game headlessly with a greedy steering rule, one fixed move interval per frame.
pub struct Autopilot {
    session: Session,
    max_moves_per_game: usize,
}

impl Autopilot {
    pub fn new(rules: Rules) -> Self {
        Self {
            session: Session::new(rules),
            max_moves_per_game: 60_000,
        }
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves_per_game = max_moves;
        self
    }

    pub fn run_x_games(&mut self, games: usize) -> Result<Vec<GameSummary>, SessionError> {
        let mut summaries = Vec::with_capacity(games);
        for game in 0..games {
            let summary = self.run_one_game()?;
            println!(
                "Game {game}: moves={}, apples={}, length={}, crashed={}",
                summary.moves, summary.apples, summary.length, summary.crashed
            );
            summaries.push(summary);
        }
        Ok(summaries)
    }

    pub fn run_one_game(&mut self) -> Result<GameSummary, SessionError> {
        self.session.return_home();
        self.session.start(MapKind::Ground, Difficulty::Easy)?;
        let step = self.session.rules().move_interval;
        let mut summary = GameSummary::default();

        while self.session.phase() == Phase::Playing && summary.moves < self.max_moves_per_game {
            if let Some(key) = self.session.game().and_then(choose_turn) {
                self.session.push_input(InputEvent::Key(key));
            }
            self.session.update(step);
            summary.moves += 1;
            for event in self.session.drain_events() {
                match event {
                    GameEvent::AppleEaten { apples, .. } => summary.apples = apples,
                    GameEvent::GameOver { .. } => summary.crashed = true,
                    _ => {}
                }
            }
        }
        summary.length = self.session.game().map_or(0, |game| game.snake().length());
        Ok(summary)
    }
}

/// Greedy: head for the apple, but never pick a heading that reaches a wall soon.
/// Keeps the current heading unless a turn is strictly better.
fn choose_turn(game: &SnakeGame) -> Option<GameKey> {
    let snake = game.snake();
    let head = snake.head_location();
    let dir = snake.direction();
    let to_apple = (game.apple().location() - head).with_y(0.0).normalize_or_zero();
    let candidates = [
        (None, dir),
        (Some(GameKey::TurnLeft), Vec3::new(dir.z, 0.0, -dir.x)),
        (Some(GameKey::TurnRight), Vec3::new(-dir.z, 0.0, dir.x)),
    ];

    let mut best = (None, f32::MIN);
    for (key, heading) in candidates {
        let mut score = heading.normalize_or_zero().dot(to_apple);
        if game.arena().hits_wall(head + heading * WALL_LOOKAHEAD) {
            score -= 10.0;
        }
        if score > best.1 {
            best = (key, score);
        }
    }
    best.0
}
