//=========================================================================
// Game Events
//=========================================================================
//
// Published on the message bus by the gameplay systems and drained by the
// play scene at the end of its update, which turns them into effects.
//
//=========================================================================

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired { position: Vec2 },
    WallHit { position: Vec2, destructible: bool },
    WallDestroyed { position: Vec2 },
    Landed { position: Vec2 },
    TookOff { position: Vec2 },
    Crashed { position: Vec2 },
}

impl GameEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            Self::ShotFired { position }
            | Self::WallHit { position, .. }
            | Self::WallDestroyed { position }
            | Self::Landed { position }
            | Self::TookOff { position }
            | Self::Crashed { position } => position,
        }
    }
}
