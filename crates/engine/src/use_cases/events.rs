//! Event router.
//!
//! Turns raw renderer events into dispatcher operations. A tap is routed by
//! the tapped object's canonical action, so the renderer never needs to know
//! puzzle rules. Every event answers with one engine message.

use std::sync::Arc;

use sceneforge_domain::{DialogNodeId, DomainError, GroupId, ObjectId, Route};
use sceneforge_shared::{EngineMessage, ObjectAction, PlayerEvent};

use crate::stores::SessionStore;
use crate::use_cases::interaction::{DispatchError, DispatchReport, InteractionDispatcher};
use crate::use_cases::resolution::{action_for, evaluate, render};

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    InvalidId(#[from] DomainError),
    #[error("Unsupported event")]
    Unsupported,
}

pub struct EventRouter {
    dispatcher: Arc<InteractionDispatcher>,
    session: Arc<SessionStore>,
    locale: String,
}

impl EventRouter {
    pub fn new(dispatcher: Arc<InteractionDispatcher>, locale: impl Into<String>) -> Self {
        let session = dispatcher.session().clone();
        Self {
            dispatcher,
            session,
            locale: locale.into(),
        }
    }

    /// Process one event and describe the result.
    pub async fn handle(&self, event: PlayerEvent) -> EngineMessage {
        match self.dispatch(event).await {
            Ok(report) => {
                let (signal, durable) = report
                    .map(|r| (r.outcome.signal(), r.durable))
                    .unwrap_or((None, true));
                let state = self.session.snapshot().await;
                EngineMessage::frame(render(&state, &self.locale), signal, durable)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Event rejected");
                EngineMessage::error(e.to_string())
            }
        }
    }

    /// Frame of the current state without processing anything.
    pub async fn current_frame(&self) -> EngineMessage {
        let state = self.session.snapshot().await;
        EngineMessage::frame(render(&state, &self.locale), None, state.last_durable)
    }

    async fn dispatch(&self, event: PlayerEvent) -> Result<Option<DispatchReport>, EventError> {
        let dispatcher = &self.dispatcher;
        let report = match event {
            PlayerEvent::TapObject { id } => return self.tap(ObjectId::parse(id)?).await,
            PlayerEvent::DragReleaseObject { id, x, y, group_id } => {
                let group_id = group_id.map(GroupId::parse).transpose()?;
                dispatcher
                    .drop_draggable(&ObjectId::parse(id)?, group_id.as_ref(), x, y)
                    .await?
            }
            PlayerEvent::ChooseDialog { node_id } => {
                dispatcher
                    .choose_dialog_option(&DialogNodeId::parse(node_id)?)
                    .await?
            }
            PlayerEvent::Navigate { route } => dispatcher.navigate(&Route::from(route)).await?,
            PlayerEvent::SelectItem { id } => dispatcher.select_item(&ObjectId::parse(id)?).await?,
            PlayerEvent::DeselectItem => dispatcher.deselect_item().await?,
            PlayerEvent::CloseOverlay => dispatcher.close_overlay().await?,
            PlayerEvent::ToggleInventory => dispatcher.toggle_inventory().await?,
            PlayerEvent::ResetRequested => dispatcher.reset().await?,
            PlayerEvent::Unknown => return Err(EventError::Unsupported),
        };
        Ok(Some(report))
    }

    /// Route a tap by the object's canonical action.
    ///
    /// Taps on inert objects, inactive nav hotspots and draggables produce
    /// no operation.
    async fn tap(&self, id: ObjectId) -> Result<Option<DispatchReport>, EventError> {
        let (action, interactive, held) = self
            .session
            .read(|state| {
                state.working.object(&id).map(|object| {
                    (
                        action_for(object),
                        evaluate(object, &state.resolution).interactive,
                        state.resolution.selected_item.clone(),
                    )
                })
            })
            .await
            .ok_or_else(|| DispatchError::UnknownObject(id.clone()))?;

        let dispatcher = &self.dispatcher;
        let report = match action {
            ObjectAction::Navigate { route } if interactive => {
                dispatcher.navigate(&Route::from(route)).await?
            }
            ObjectAction::Navigate { .. } | ObjectAction::Drag | ObjectAction::None => {
                return Ok(None)
            }
            ObjectAction::Collect => dispatcher.collect(&id).await?,
            ObjectAction::Receive => dispatcher.receive(&id, held.as_ref()).await?,
            ObjectAction::ToggleSlot { group_id } => {
                dispatcher
                    .toggle_slot(&GroupId::parse(group_id)?, &id)
                    .await?
            }
            ObjectAction::AdvanceSequence { group_id } => {
                dispatcher
                    .advance_sequence(&GroupId::parse(group_id)?, &id)
                    .await?
            }
            ObjectAction::OpenDialog => dispatcher.open_dialog(&id).await?,
            ObjectAction::OpenPanel => dispatcher.open_panel(&id).await?,
            ObjectAction::ToggleDecorative => dispatcher.toggle_decorative(&id).await?,
        };
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::Harness;
    use sceneforge_shared::{InteractionSignal, RenderModel};

    fn router_at(route: &str) -> EventRouter {
        let (harness, _) = Harness::in_memory(route);
        EventRouter::new(Arc::new(harness.dispatcher), "en")
    }

    fn tap(id: &str) -> PlayerEvent {
        PlayerEvent::TapObject { id: id.into() }
    }

    fn frame(message: EngineMessage) -> (RenderModel, Option<InteractionSignal>) {
        match message {
            EngineMessage::Frame { model, signal, .. } => (*model, signal),
            EngineMessage::Error { message } => panic!("expected a frame, got error: {message}"),
        }
    }

    #[tokio::test]
    async fn taps_follow_object_kind() {
        let router = router_at("room");

        let (model, signal) = frame(router.handle(tap("key")).await);
        assert_eq!(signal, Some(InteractionSignal::Success));
        assert!(!model.is_visible("key"));
        assert_eq!(model.inventory.len(), 1);

        let (_, signal) = frame(router.handle(tap("door")).await);
        assert_eq!(signal, Some(InteractionSignal::Failure));

        router
            .handle(PlayerEvent::SelectItem { id: "key".into() })
            .await;
        let (model, signal) = frame(router.handle(tap("door")).await);
        assert_eq!(signal, Some(InteractionSignal::Success));
        assert!(model.is_visible("open-door"));
        assert_eq!(model.selected_item, None);
    }

    #[tokio::test]
    async fn inactive_nav_does_nothing_until_activated() {
        let router = router_at("room");

        let (model, signal) = frame(router.handle(tap("to-hall")).await);
        assert_eq!(model.route, "room");
        assert_eq!(signal, None);

        router.handle(tap("key")).await;
        router
            .handle(PlayerEvent::SelectItem { id: "key".into() })
            .await;
        router.handle(tap("door")).await;

        let (model, _) = frame(router.handle(tap("to-hall")).await);
        assert_eq!(model.route, "hall");
    }

    #[tokio::test]
    async fn slot_and_dialog_taps_are_routed() {
        let router = router_at("trash");
        let (model, _) = frame(router.handle(tap("slot1_1")).await);
        assert_eq!(
            model.object("slot1_1").unwrap().visual,
            sceneforge_domain::Visual::image("slot-2.png")
        );

        let router = router_at("talk");
        let (model, _) = frame(router.handle(tap("virus")).await);
        let dialog = model.dialog.unwrap();
        assert_eq!(dialog.text, "Hello");
        assert_eq!(dialog.choices.len(), 2);

        let (model, _) = frame(
            router
                .handle(PlayerEvent::ChooseDialog {
                    node_id: "bye".into(),
                })
                .await,
        );
        assert!(model.dialog.unwrap().choices.is_empty());
    }

    #[tokio::test]
    async fn drag_release_reaches_receiver() {
        let router = router_at("talk");

        let (model, signal) = frame(
            router
                .handle(PlayerEvent::DragReleaseObject {
                    id: "battery".into(),
                    x: 70.0,
                    y: 70.0,
                    group_id: Some("power".into()),
                })
                .await,
        );

        assert_eq!(signal, Some(InteractionSignal::Success));
        assert!(!model.is_visible("battery"));
    }

    #[tokio::test]
    async fn bad_events_produce_error_messages() {
        let router = router_at("room");

        for event in [
            tap("ghost"),
            tap(""),
            PlayerEvent::Unknown,
            PlayerEvent::Navigate {
                route: "attic".into(),
            },
        ] {
            assert!(matches!(
                router.handle(event).await,
                EngineMessage::Error { .. }
            ));
        }

        // The session keeps going.
        let (model, _) = frame(router.current_frame().await);
        assert_eq!(model.route, "room");
    }
}
