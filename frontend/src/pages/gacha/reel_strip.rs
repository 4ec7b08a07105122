use shared::shared_gacha::{ReelFrame, ReelSet, Reward, ITEM_HEIGHT, REEL_COUNT};
use yew::prelude::*;
use crate::styles;

/// Items visible through each reel window; the middle one is the pay line
const VISIBLE_ITEMS: f64 = 3.0;

#[derive(Properties, PartialEq)]
pub struct ReelStripProps {
    pub reels: ReelSet,
    pub frames: [ReelFrame; REEL_COUNT],
}

/// Translation that puts item `offset / ITEM_HEIGHT` on the centre row
pub fn strip_transform(frame: &ReelFrame) -> String {
    format!(
        "transform: translateY({:.1}px); filter: blur({:.1}px);",
        ITEM_HEIGHT - frame.offset,
        frame.blur
    )
}

fn reel_item(reward: &Reward) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center text-center px-2 select-none"
            style={format!("height: {}px; color: {};", ITEM_HEIGHT, reward.color)}>
            <span class="text-sm font-semibold leading-tight">{reward.name.to_string()}</span>
            <span class="text-[10px] uppercase tracking-wide text-gray-400">{reward.rarity.label()}</span>
        </div>
    }
}

#[function_component(ReelStrip)]
pub fn reel_strip(props: &ReelStripProps) -> Html {
    html! {
        <div class="relative grid grid-cols-3 gap-3">
            { for props.reels.reels.iter().zip(props.frames.iter()).map(|(reel, frame)| html! {
                <div class={styles::REEL_WINDOW} style={format!("height: {}px;", ITEM_HEIGHT * VISIBLE_ITEMS)}>
                    <div class="will-change-transform" style={strip_transform(frame)}>
                        { for reel.iter().map(reel_item) }
                    </div>
                </div>
            }) }
            <div class={styles::REEL_PAY_LINE}
                style={format!("top: {}px; height: {}px;", ITEM_HEIGHT, ITEM_HEIGHT)} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::shared_gacha::STOP_INDEX;

    #[test]
    fn stopped_reel_centres_the_stop_index() {
        let frame = ReelFrame { offset: STOP_INDEX as f64 * ITEM_HEIGHT, blur: 0.0, done: true };
        let expected = -(STOP_INDEX as f64 - 1.0) * ITEM_HEIGHT;
        assert_eq!(
            strip_transform(&frame),
            format!("transform: translateY({:.1}px); filter: blur(0.0px);", expected)
        );
    }
}
