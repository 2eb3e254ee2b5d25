use acidgrid_core as game;
use gloo::events::EventListener;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::theme::Theme;
use crate::utils::*;

/// Persisted best total score, stored separately from any session state so a
/// record survives page reloads and new runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Highscore(u32);

impl StorageKey for Highscore {
    const KEY: &'static str = "acidgrid:highscore";
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Move(game::Direction),
    Apply,
    ToggleTheme,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct GameProps {
    /// Forced seed from the location hash, random otherwise.
    #[prop_or_default]
    pub seed: Option<u64>,
}

fn key_to_msg(key: &str) -> Option<Msg> {
    use game::Direction::*;

    match key {
        "w" | "W" | "ArrowUp" => Some(Msg::Move(Up)),
        "s" | "S" | "ArrowDown" => Some(Msg::Move(Down)),
        "a" | "A" | "ArrowLeft" => Some(Msg::Move(Left)),
        "d" | "D" | "ArrowRight" => Some(Msg::Move(Right)),
        " " | "Enter" => Some(Msg::Apply),
        _ => None,
    }
}

pub(crate) struct GameView {
    session: game::GameSession,
    summary: Option<game::GameSummary>,
    theme: Theme,
    _kbd_listener: EventListener,
}

impl GameView {
    fn create_kbd_listener(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&gloo::utils::document(), "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(msg) = key_to_msg(&event.key()) {
                event.prevent_default();
                link.send_message(msg);
            }
        })
    }

    fn swatch_class(slot: game::ColorSlot) -> Classes {
        classes!("swatch", format!("color-{}", slot.index()))
    }

    fn view_info_bar(&self, ctx: &Context<Self>) -> Html {
        let session = &self.session;
        let cb_theme = ctx.link().callback(|_| Msg::ToggleTheme);

        html! {
            <header class="info">
                <span><strong>{"Level"}</strong>{format!(" {}", session.level())}</span>
                <span>
                    <strong>{"Turns"}</strong>
                    {format!(" {} / {}", session.turns(), session.turn_budget())}
                </span>
                <span><strong>{"Score"}</strong>{format!(" {}", session.level_score())}</span>
                <span><strong>{"Total"}</strong>{format!(" {}", session.total_score())}</span>
                <span><strong>{"Best"}</strong>{format!(" {}", session.highscore())}</span>
                <span>
                    <strong>{"Next"}</strong>
                    <div class={Self::swatch_class(session.target())}/>
                </span>
                <button class="theme-toggle" onclick={cb_theme}>
                    {self.theme.toggled().scheme()}
                </button>
            </header>
        }
    }

    fn view_board(&self) -> Html {
        let (cols, rows) = self.session.size();
        let player = self.session.player();

        html! {
            <table class="board">
                {
                    for (0..rows).map(|y| html! {
                        <tr>
                            {
                                for (0..cols).map(|x| {
                                    let slot = self.session.cell_at((x, y));
                                    let class = classes!(
                                        "cell",
                                        format!("color-{}", slot.index()),
                                        ((x, y) == player).then_some("player"),
                                    );
                                    html! { <td {class}/> }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_summary(&self) -> Html {
        let Some(summary) = self.summary else {
            return html! {};
        };

        html! {
            <dialog class="game-over" open={true}>
                <h2>{"Game Over"}</h2>
                <p>{format!("Score: {}", summary.final_score)}</p>
                <p>{format!("Highscore: {}", summary.highscore)}</p>
                if summary.new_highscore {
                    <p class="record">{"New record!"}</p>
                }
                <small>{"press any key"}</small>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let Highscore(highscore) = LocalOrDefault::local_or_default();
        log::debug!("new session, seed {}, highscore {}", seed, highscore);

        Self {
            session: game::GameSession::new(game::BoardConfig::default(), seed, highscore),
            summary: None,
            theme: Theme::init(),
            _kbd_listener: Self::create_kbd_listener(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        // the keystroke that dismisses the game-over overlay is swallowed
        if matches!(msg, Move(_) | Apply) && self.summary.take().is_some() {
            return true;
        }

        match msg {
            Move(direction) => self.session.move_player(direction).has_update(),
            Apply => {
                let outcome = self.session.apply_move();
                if let game::MoveOutcome::GameOver(summary) = outcome {
                    if summary.new_highscore {
                        Highscore(summary.highscore).local_save();
                    }
                    self.summary = Some(summary);
                }
                outcome.has_update()
            }
            ToggleTheme => {
                self.theme = self.theme.toggled();
                self.theme.apply();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="acidgrid">
                {self.view_info_bar(ctx)}
                {self.view_board()}
                {self.view_summary()}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<Highscore as StorageKey>::KEY, "acidgrid:highscore");
    }

    #[test]
    fn keys_map_to_moves_and_apply() {
        assert_eq!(key_to_msg("w"), Some(Msg::Move(game::Direction::Up)));
        assert_eq!(key_to_msg("ArrowRight"), Some(Msg::Move(game::Direction::Right)));
        assert_eq!(key_to_msg(" "), Some(Msg::Apply));
        assert_eq!(key_to_msg("x"), None);
    }
}
