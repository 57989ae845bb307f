mod config;
mod quiz;
mod render;

use std::sync::Arc;

use chatgpt::client::ChatGPT;
use dotenv::dotenv;
use log::{error, warn};
use quiz::{
    controller::{Phase, Session, SessionController},
    parser::ResponseParser,
    questions::QuestionGenerator,
    summary::SummaryGenerator,
    Answer, QuizError, OTHER_CHOICE, PREFERENCE_CHOICES,
};
use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::{ChatAction, ChatId, KeyboardRemove},
};

type LearnDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Learning {
        session: Session,
        awaiting_other: bool,
        picked: Vec<String>,
    },
}

/// Builds a controller around a chat's stored session.
#[derive(Clone)]
struct Tutor {
    questions: QuestionGenerator,
    summaries: SummaryGenerator,
}

impl Tutor {
    fn fresh(&self) -> SessionController {
        SessionController::new(self.questions.clone(), self.summaries.clone())
    }

    fn controller(&self, session: Session) -> SessionController {
        SessionController::resume(self.questions.clone(), self.summaries.clone(), session)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting GenAI learning path bot...");

    let settings = config::Settings::from_env()?;

    let gpt = {
        let mut gpt = ChatGPT::new(settings.api_key.clone())?;

        gpt.config.engine = settings.engine.into();
        gpt.config.timeout = settings.timeout;
        gpt.config.temperature = settings.temperature;

        gpt
    };
    let model: Arc<dyn quiz::ai_helper::Completion> = Arc::new(gpt);

    let tutor = Tutor {
        questions: QuestionGenerator::new(
            model.clone(),
            ResponseParser::new(settings.choice_style),
        ),
        summaries: SummaryGenerator::new(model),
    };

    let bot = Bot::from_env();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, InMemStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(
                dptree::case![State::Learning {
                    session,
                    awaiting_other,
                    picked
                }]
                .endpoint(learning),
            ),
    )
    .dependencies(dptree::deps![InMemStorage::<State>::new(), tutor])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const GREETING_TEXT: &str = "Learn Generative AI\n\nStart your GenAI journey by telling us why you're here. We'll guide you from there.";
async fn start(tutor: Tutor, bot: Bot, dialogue: LearnDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;

    let controller = tutor.fresh();
    render::show(&bot, msg.chat.id, &controller.display(), &[]).await?;

    dialogue
        .update(State::Learning {
            session: controller.into_session(),
            awaiting_other: false,
            picked: Vec::new(),
        })
        .await?;
    Ok(())
}

async fn learning(
    tutor: Tutor,
    bot: Bot,
    dialogue: LearnDialogue,
    (session, awaiting_other, mut picked): (Session, bool, Vec<String>),
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please answer with text or use the buttons below")
            .await?;
        return Ok(());
    };
    if text.starts_with("/start") {
        return start(tutor, bot, dialogue, msg).await;
    }

    let mut controller = tutor.controller(session);
    let asking = matches!(controller.session().phase, Phase::AskingQuestion(_));

    let outcome = if asking {
        if text == render::SKIP_BUTTON {
            typing(&bot, msg.chat.id).await;
            controller.skip().await
        } else if text == OTHER_CHOICE && !awaiting_other {
            bot.send_message(msg.chat.id, "Please type your answer")
                .reply_markup(KeyboardRemove::new())
                .await?;
            dialogue
                .update(State::Learning {
                    session: controller.into_session(),
                    awaiting_other: true,
                    picked,
                })
                .await?;
            return Ok(());
        } else {
            let answer = if awaiting_other {
                Answer::from_selection(OTHER_CHOICE, Some(text))
            } else {
                Answer::new(text)
            };
            typing(&bot, msg.chat.id).await;
            controller.submit_answer(answer).await
        }
    } else if text == render::RESTART_BUTTON {
        picked.clear();
        controller.restart()
    } else if text == render::SUBMIT_PREFERENCES_BUTTON {
        typing(&bot, msg.chat.id).await;
        controller.submit_preferences(picked.clone()).await
    } else if PREFERENCE_CHOICES.contains(&text) {
        toggle(&mut picked, text);
        bot.send_message(msg.chat.id, render::selection(&picked))
            .await?;
        dialogue
            .update(State::Learning {
                session: controller.into_session(),
                awaiting_other: false,
                picked,
            })
            .await?;
        return Ok(());
    } else {
        bot.send_message(msg.chat.id, "Please use the buttons below")
            .await?;
        return Ok(());
    };

    match outcome {
        Ok(directive) => render::show(&bot, msg.chat.id, &directive, &picked).await?,
        Err(err) => {
            report(&bot, msg.chat.id, &err).await?;
            render::show(&bot, msg.chat.id, &controller.display(), &picked).await?;
        }
    }

    dialogue
        .update(State::Learning {
            session: controller.into_session(),
            awaiting_other: false,
            picked,
        })
        .await?;
    Ok(())
}

fn toggle(picked: &mut Vec<String>, preference: &str) {
    if let Some(idx) = picked.iter().position(|p| p == preference) {
        picked.remove(idx);
    } else {
        picked.push(preference.to_string());
    }
}

async fn typing(bot: &Bot, chat_id: ChatId) {
    // Only cosmetic, a failure here should not stop the quiz
    let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;
}

async fn report(bot: &Bot, chat_id: ChatId, err: &QuizError) -> HandlerResult {
    let text = match err {
        QuizError::InvalidTransition { .. } => {
            warn!("{}", err);
            "That isn't available right now."
        }
        _ => {
            error!("{}", err);
            "Sorry, the tutor could not answer just now. Please try again."
        }
    };
    bot.send_message(chat_id, text).await?;
    Ok(())
}
