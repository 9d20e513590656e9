//! Rendering a ranking for people (text) and for other programs (JSON).

mod format;

use std::fmt;

use serde::Serialize;

pub use format::{format_duration, grow_label, group_thousands};

use crate::{
    config::ReportConfig,
    data::{ImageIndex, ImageRef, PLACEHOLDER_GLYPH},
    land::{LandBuff, LAND_BUFFS},
    ranking::{RankedCrop, Ranking, RankingInputs, Target},
};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

fn image_for(images: &ImageIndex, row: &RankedCrop, base_url: &str) -> Option<ImageRef> {
    images.resolve(Some(row.crop.seed_id), &row.crop.name, base_url)
}

/// Fertilizer states to recommend for: plain always, fertilized when used.
fn recommendation_states(inputs: &RankingInputs) -> &'static [bool] {
    if inputs.use_fertilizer {
        &[false, true]
    } else {
        &[false]
    }
}

pub struct TextReport<'a> {
    ranking: &'a Ranking,
    images: &'a ImageIndex,
    config: &'a ReportConfig,
}

impl<'a> TextReport<'a> {
    pub fn new(ranking: &'a Ranking, images: &'a ImageIndex, config: &'a ReportConfig) -> Self {
        Self {
            ranking,
            images,
            config,
        }
    }

    fn write_card(&self, f: &mut fmt::Formatter<'_>, row: &RankedCrop, fertilized: bool) -> fmt::Result {
        let target = self.ranking.inputs.target;
        let title = if fertilized { "施肥推荐" } else { "不施肥推荐" };
        let image = image_for(self.images, row, &self.config.asset_base_url);
        let glyph = if image.is_some() { "" } else { PLACEHOLDER_GLYPH };
        writeln!(f, "{title}: {glyph}{}", row.crop.name)?;
        writeln!(f, "  每小时{}  {:.2}", target.label(), row.per_hour(target, fertilized))?;
        writeln!(f, "  每日{}    {}", target.label(), group_thousands(row.per_day(target, fertilized)))?;
        if fertilized {
            writeln!(f, "  肥后生长    {}", grow_label(row, true))?;
            writeln!(f, "  提升比例    +{:.2}%", row.gain_percent)?;
        } else {
            writeln!(f, "  生长时间    {}", grow_label(row, false))?;
            writeln!(f, "  需要等级    Lv {}", row.crop.required_level)?;
        }
        if let Some(image) = image {
            writeln!(f, "  图片        {}", image.primary)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs = &self.ranking.inputs;
        let target = inputs.target;
        writeln!(f, "QQ农场收益计算器")?;
        writeln!(
            f,
            "等级 {} · 土地 {} · 目标 {}最大 · 普通肥料 {}",
            inputs.level,
            inputs.plots,
            target.label(),
            if inputs.use_fertilizer { "是" } else { "否" }
        )?;
        writeln!(f)?;

        if self.ranking.is_empty() {
            writeln!(f, "当前条件下没有可种植的作物")?;
        } else {
            for &fertilized in recommendation_states(inputs) {
                if let Some(row) = self.ranking.recommended(target, fertilized) {
                    self.write_card(f, row, fertilized)?;
                }
            }

            writeln!(f, "🏆 {}排行榜 (Top {})", target.label(), self.config.top)?;
            writeln!(f, "排名\t作物\t等级\t生长时间\t每小时{}", target.label())?;
            for (i, row) in self.ranking.view(target).iter().take(self.config.top).enumerate() {
                let rank = MEDALS
                    .get(i)
                    .map(|medal| medal.to_string())
                    .unwrap_or_else(|| (i + 1).to_string());
                writeln!(
                    f,
                    "{rank}\t{}\tLv {}\t{}\t{:.2}",
                    row.crop.name,
                    row.crop.required_level,
                    grow_label(row, inputs.use_fertilizer),
                    row.per_hour(target, inputs.use_fertilizer)
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "🟫 土地加成参考")?;
        for buff in LAND_BUFFS.iter() {
            writeln!(f, "  {} {}", buff.tier.label(), buff.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct Recommendation<'a> {
    pub fertilized: bool,
    pub per_hour: f64,
    pub per_day: f64,
    pub grow_label: String,
    pub image: Option<ImageRef>,
    pub crop: &'a RankedCrop,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry<'a> {
    pub rank: usize,
    pub per_hour: f64,
    pub grow_label: String,
    pub image: Option<ImageRef>,
    pub crop: &'a RankedCrop,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub inputs: RankingInputs,
    pub target: Target,
    pub recommendations: Vec<Recommendation<'a>>,
    pub leaderboard: Vec<LeaderboardEntry<'a>>,
    pub land_buffs: &'static [LandBuff],
}

impl<'a> JsonReport<'a> {
    pub fn build(ranking: &'a Ranking, images: &ImageIndex, config: &ReportConfig) -> Self {
        let inputs = ranking.inputs;
        let target = inputs.target;
        let base_url = config.asset_base_url.as_str();

        let recommendations = recommendation_states(&inputs)
            .iter()
            .filter_map(|&fertilized| {
                let row = ranking.recommended(target, fertilized)?;
                Some(Recommendation {
                    fertilized,
                    per_hour: row.per_hour(target, fertilized),
                    per_day: row.per_day(target, fertilized),
                    grow_label: grow_label(row, fertilized),
                    image: image_for(images, row, base_url),
                    crop: row,
                })
            })
            .collect();

        let leaderboard = ranking
            .view(target)
            .iter()
            .take(config.top)
            .enumerate()
            .map(|(i, row)| LeaderboardEntry {
                rank: i + 1,
                per_hour: row.per_hour(target, inputs.use_fertilizer),
                grow_label: grow_label(row, inputs.use_fertilizer),
                image: image_for(images, row, base_url),
                crop: row,
            })
            .collect();

        Self {
            inputs,
            target,
            recommendations,
            leaderboard,
            land_buffs: &LAND_BUFFS,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::StaticTables;

    fn tables() -> StaticTables {
        StaticTables::from_documents(
            &json!([
                { "seedId": 1, "name": "Wheat", "requiredLevel": 1, "growTimeSec": 100,
                  "growTimeStr": "1分40秒", "exp": 10, "price": 5 },
                { "seedId": 2, "name": "Corn", "requiredLevel": 2, "growTimeSec": 600,
                  "exp": 80, "price": 40, "seasons": 2 },
            ]),
            &json!([{ "seed_id": 2, "grow_phases": "a:100;b:200" }]),
            &json!([{ "seedId": 1, "name": "Wheat", "fileName": "wheat.png" }]),
        )
    }

    fn inputs(use_fertilizer: bool) -> RankingInputs {
        RankingInputs {
            level: 10,
            plots: 9,
            use_fertilizer,
            target: Target::Experience,
        }
    }

    #[test]
    fn text_report_lists_cards_board_and_legend() {
        let tables = tables();
        let ranking = Ranking::compute(&tables, inputs(true));
        let text = TextReport::new(&ranking, &tables.images, &ReportConfig::default()).to_string();
        assert!(text.contains("不施肥推荐: 🌱Corn"));
        assert!(text.contains("\n施肥推荐: 🌱Corn"));
        assert!(text.contains("🏆 经验排行榜 (Top 20)"));
        assert!(text.contains("🥇\tCorn"));
        assert!(text.contains("🥈\tWheat\tLv 1\t1分40秒"));
        assert!(!text.contains("图片"));
        assert!(text.contains("金土地 产量+300% / 提速20% / 经验+20%"));
    }

    #[test]
    fn recommendation_cards_show_their_own_details() {
        let tables = tables();
        let ranking = Ranking::compute(&tables, inputs(true));
        let text = TextReport::new(&ranking, &tables.images, &ReportConfig::default()).to_string();
        let (plain, fertilized) = text
            .split_once("\n施肥推荐: ")
            .expect("fertilized card is rendered");

        // Corn: 2 seasons of 80 exp on 9 plots, cycles of 801s and 701.5s
        assert!(plain.contains("  每日经验    155,326"));
        assert!(plain.contains("  生长时间    13分20秒 (共2季)"));
        assert!(plain.contains("  需要等级    Lv 2"));
        assert!(!plain.contains("提升比例"));

        let card = fertilized.split("\n\n").next().unwrap_or_default();
        assert!(card.starts_with("🌱Corn"));
        assert!(card.contains("  每日经验    177,357"));
        assert!(card.contains("  肥后生长    11分40秒 (共2季)"));
        assert!(card.contains("  提升比例    +14.18%"));
        assert!(!card.contains("需要等级"));
    }

    #[test]
    fn text_report_without_fertilizer_has_one_card() {
        let tables = tables();
        let ranking = Ranking::compute(&tables, inputs(false));
        let text = TextReport::new(&ranking, &tables.images, &ReportConfig::default()).to_string();
        assert!(text.contains("不施肥推荐"));
        assert!(!text.contains("\n施肥推荐"));
    }

    #[test]
    fn empty_ranking_says_so() {
        let tables = tables();
        let ranking = Ranking::compute(&tables, RankingInputs { plots: 0, ..inputs(true) });
        let text = TextReport::new(&ranking, &tables.images, &ReportConfig::default()).to_string();
        assert!(text.contains("没有可种植的作物"));
        assert!(!text.contains("排行榜"));
    }

    #[test]
    fn json_report_carries_images_and_ranks() {
        let tables = tables();
        let ranking = Ranking::compute(&tables, inputs(true));
        let config = ReportConfig { top: 1, asset_base_url: "/assets".into() };
        let report = JsonReport::build(&ranking, &tables.images, &config);
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(report.leaderboard.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["target"], "exp");
        assert_eq!(value["leaderboard"][0]["rank"], 1);
        assert_eq!(value["leaderboard"][0]["crop"]["name"], "Corn");
        assert_eq!(value["leaderboard"][0]["grow_label"], "11分40秒 (共2季)");
        assert!(value["leaderboard"][0]["image"].is_null());
        assert_eq!(value["land_buffs"].as_array().map(Vec::len), Some(4));

        let wheat = ranking.rows().iter().find(|r| r.crop.name == "Wheat").unwrap();
        let image = image_for(&tables.images, wheat, "/assets").unwrap();
        assert_eq!(image.primary, "/assets/wheat.png");
    }
}
