use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandTier {
    Normal,
    Red,
    Black,
    Gold,
}

/// Bonuses a plot grants by soil tier. Reference material for the player;
/// the ranking assumes plain plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LandBuff {
    pub tier: LandTier,
    pub yield_bonus_percent: u32,
    pub time_multiplier: f64,
    pub exp_multiplier: f64,
}

pub const LAND_BUFFS: [LandBuff; 4] = [
    LandBuff {
        tier: LandTier::Normal,
        yield_bonus_percent: 0,
        time_multiplier: 1.0,
        exp_multiplier: 1.0,
    },
    LandBuff {
        tier: LandTier::Red,
        yield_bonus_percent: 100,
        time_multiplier: 1.0,
        exp_multiplier: 1.0,
    },
    LandBuff {
        tier: LandTier::Black,
        yield_bonus_percent: 200,
        time_multiplier: 0.9,
        exp_multiplier: 1.0,
    },
    LandBuff {
        tier: LandTier::Gold,
        yield_bonus_percent: 300,
        time_multiplier: 0.8,
        exp_multiplier: 1.2,
    },
];

impl LandTier {
    pub fn label(self) -> &'static str {
        match self {
            LandTier::Normal => "普通",
            LandTier::Red => "红土地",
            LandTier::Black => "黑土地",
            LandTier::Gold => "金土地",
        }
    }
}

impl LandBuff {
    pub fn speed_bonus_percent(&self) -> u32 {
        ((1.0 - self.time_multiplier) * 100.0).round() as u32
    }

    pub fn exp_bonus_percent(&self) -> u32 {
        ((self.exp_multiplier - 1.0) * 100.0).round() as u32
    }

    /// e.g. `产量+300% / 提速20% / 经验+20%`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.yield_bonus_percent > 0 {
            parts.push(format!("产量+{}%", self.yield_bonus_percent));
        }
        let speed = self.speed_bonus_percent();
        if speed > 0 {
            parts.push(format!("提速{speed}%"));
        }
        let exp = self.exp_bonus_percent();
        if exp > 0 {
            parts.push(format!("经验+{exp}%"));
        }
        if parts.is_empty() {
            "无加成".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_text() {
        let described: Vec<String> = LAND_BUFFS.iter().map(LandBuff::describe).collect();
        assert_eq!(
            described,
            [
                "无加成",
                "产量+100%",
                "产量+200% / 提速10%",
                "产量+300% / 提速20% / 经验+20%",
            ]
        );
    }
}
