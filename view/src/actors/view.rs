use handle_macro::Handle;
use ircmux_core::{
    constants::EVENT_CHANNEL_CAPACITY,
    error::SessionResult,
    events::{Rank, TextUnit},
    ids::{ServerId, SessionId},
    keys::SessionKind,
    states::{BufferSnapshot, ViewState},
};
use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;

use crate::{mux::Mux, prelude::*, render::RenderTarget};

/// Everything the surrounding application may ask of the view. Network
/// collaborators get the fire-and-forget ingestion variants; UI input
/// handling gets the lifecycle and switch variants with replies.
#[derive(Handle)]
pub enum ViewEvent {
    // network -> view ingestion
    AppendToSession {
        session_id: SessionId,
        unit: TextUnit,
    },
    UpdateRoster {
        session_id: SessionId,
        nick: String,
        rank: Rank,
    },
    RemoveFromRoster {
        session_id: SessionId,
        nick: String,
    },
    RenameInRoster {
        session_id: SessionId,
        old: String,
        new: String,
    },
    SetTopic {
        session_id: SessionId,
        topic: String,
    },
    LogRaw {
        server_id: ServerId,
        line: String,
    },

    // lifecycle
    CreateServer {
        name: String,
        reply: oneshot::Sender<ServerId>,
    },
    DestroyServer {
        server_id: ServerId,
        reply: oneshot::Sender<SessionResult<()>>,
    },
    CreateSession {
        server_id: ServerId,
        kind: SessionKind,
        name: String,
        reply: oneshot::Sender<SessionResult<SessionId>>,
    },
    DestroySession {
        session_id: SessionId,
        reply: oneshot::Sender<SessionResult<()>>,
    },

    // ui -> view
    SwitchTo {
        session_id: SessionId,
        reply: oneshot::Sender<SessionResult<()>>,
    },
    Unbind,

    // queries
    Snapshot {
        session_id: SessionId,
        reply: oneshot::Sender<SessionResult<BufferSnapshot>>,
    },
    State {
        reply: oneshot::Sender<ViewState>,
    },

    Shutdown,
}
use ViewEvent::*;

/// Owns the multiplexer and is the only task that ever touches it; every
/// collaborator holds a cloned ViewHandle and enqueues discrete events, which
/// keeps the single-writer rule without any locks.
pub struct ViewActor<T: RenderTarget> {
    rx: mpsc::Receiver<ViewEvent>,
    handle: ViewHandle,
    mux: Mux<T>,
}

impl<T: RenderTarget + Send + 'static> ViewActor<T> {
    #[instrument(skip(target))]
    pub fn spawn(target: T) -> Result<ViewHandle> {
        let actor = ViewActor::new(target);
        actor.run()
    }

    fn new(target: T) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let handle = ViewHandle { tx };
        Self {
            rx,
            handle,
            mux: Mux::new(target),
        }
    }

    #[instrument(skip(self))]
    fn run(mut self) -> Result<ViewHandle> {
        let span = tracing::Span::current();
        let handle_clone = self.handle.clone();
        let _task = tokio::spawn({
            async move {
                while let Some(event) = self.rx.recv().await {
                    match event {
                        AppendToSession { session_id, unit } => {
                            trace!("ViewActor: AppendToSession");
                            if let Err(e) = self.mux.append_to_session(session_id, unit) {
                                warn!("dropping append: {e}");
                            }
                        }
                        UpdateRoster {
                            session_id,
                            nick,
                            rank,
                        } => {
                            trace!("ViewActor: UpdateRoster");
                            if let Err(e) = self.mux.update_roster(session_id, &nick, rank) {
                                warn!("dropping roster update: {e}");
                            }
                        }
                        RemoveFromRoster { session_id, nick } => {
                            trace!("ViewActor: RemoveFromRoster");
                            if let Err(e) = self.mux.remove_from_roster(session_id, &nick) {
                                warn!("dropping roster removal: {e}");
                            }
                        }
                        RenameInRoster {
                            session_id,
                            old,
                            new,
                        } => {
                            trace!("ViewActor: RenameInRoster");
                            if let Err(e) = self.mux.rename_in_roster(session_id, &old, &new) {
                                warn!("dropping roster rename: {e}");
                            }
                        }
                        SetTopic { session_id, topic } => {
                            trace!("ViewActor: SetTopic");
                            if let Err(e) = self.mux.set_topic(session_id, &topic) {
                                warn!("dropping topic update: {e}");
                            }
                        }
                        LogRaw { server_id, line } => {
                            trace!("ViewActor: LogRaw");
                            if let Err(e) = self.mux.log_raw(server_id, line) {
                                warn!("dropping raw log line: {e}");
                            }
                        }
                        CreateServer { name, reply } => {
                            debug!("ViewActor: CreateServer");
                            let id = self.mux.create_server(&name);
                            if reply.send(id).is_err() {
                                warn!("CreateServer caller went away");
                            }
                        }
                        DestroyServer { server_id, reply } => {
                            debug!("ViewActor: DestroyServer");
                            if reply.send(self.mux.destroy_server(server_id)).is_err() {
                                warn!("DestroyServer caller went away");
                            }
                        }
                        CreateSession {
                            server_id,
                            kind,
                            name,
                            reply,
                        } => {
                            debug!("ViewActor: CreateSession");
                            let res = self.mux.create_session(server_id, kind, &name);
                            if reply.send(res).is_err() {
                                warn!("CreateSession caller went away");
                            }
                        }
                        DestroySession { session_id, reply } => {
                            debug!("ViewActor: DestroySession");
                            if reply.send(self.mux.destroy_session(session_id)).is_err() {
                                warn!("DestroySession caller went away");
                            }
                        }
                        SwitchTo { session_id, reply } => {
                            debug!("ViewActor: SwitchTo");
                            if reply.send(self.mux.switch_to(session_id)).is_err() {
                                warn!("SwitchTo caller went away");
                            }
                        }
                        Unbind => {
                            debug!("ViewActor: Unbind");
                            self.mux.unbind();
                        }
                        Snapshot { session_id, reply } => {
                            trace!("ViewActor: Snapshot");
                            if reply.send(self.mux.snapshot(session_id)).is_err() {
                                warn!("Snapshot caller went away");
                            }
                        }
                        State { reply } => {
                            trace!("ViewActor: State");
                            if reply.send(self.mux.state()).is_err() {
                                warn!("State caller went away");
                            }
                        }
                        Shutdown => {
                            debug!("ViewActor: Shutdown");
                            break;
                        }
                    }
                }
            }
            .instrument(span)
        });

        Ok(handle_clone)
    }
}

#[cfg(test)]
mod test {
    use ircmux_core::error::SessionError;

    use super::*;
    use crate::render::FakeTarget;

    async fn spawn_with_channel() -> (ViewHandle, ServerId, SessionId) {
        let handle = ViewActor::spawn(FakeTarget::default()).unwrap();
        let server = handle.create_server("libera".to_string()).await.unwrap();
        let session = handle
            .create_session(server, SessionKind::Channel, "#chan1".to_string())
            .await
            .unwrap()
            .unwrap();
        (handle, server, session)
    }

    #[tokio::test]
    async fn background_task_ingestion_applies_in_order() {
        let (handle, _, chan1) = spawn_with_channel().await;

        // a stand-in for the network collaborator on its own task
        let network = handle.clone();
        let producer = tokio::spawn(async move {
            for i in 0..10 {
                network
                    .append_to_session(chan1, TextUnit::new(format!("line {i}")))
                    .await
                    .unwrap();
            }
        });
        producer.await.unwrap();

        let snapshot = handle.snapshot(chan1).await.unwrap().unwrap();
        let texts: Vec<_> = snapshot.units.iter().map(|u| u.text.clone()).collect();
        let expected: Vec<_> = (0..10).map(|i| format!("line {i}")).collect();
        assert_eq!(texts, expected);
    }

    #[tokio::test]
    async fn switch_marks_read_and_state_tracks_active() {
        let (handle, server, chan1) = spawn_with_channel().await;
        let chan2 = handle
            .create_session(server, SessionKind::Channel, "#chan2".to_string())
            .await
            .unwrap()
            .unwrap();

        handle
            .append_to_session(chan2, TextUnit::new("hello"))
            .await
            .unwrap();
        handle.switch_to(chan1).await.unwrap().unwrap();

        let state = handle.state().await.unwrap();
        assert_eq!(state.active_session, Some(chan1));
        assert_eq!(state.find_session(chan2).unwrap().unseen, 1);

        handle.switch_to(chan2).await.unwrap().unwrap();
        let snapshot = handle.snapshot(chan2).await.unwrap().unwrap();
        assert_eq!(snapshot.marker_offset, 1);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn lifecycle_errors_come_back_to_the_caller() {
        let (handle, server, chan1) = spawn_with_channel().await;

        let dup = handle
            .create_session(server, SessionKind::Channel, "#CHAN1".to_string())
            .await
            .unwrap();
        assert!(matches!(dup, Err(SessionError::DuplicateSession { .. })));

        handle.destroy_session(chan1).await.unwrap().unwrap();
        let gone = handle.switch_to(chan1).await.unwrap();
        assert_eq!(gone, Err(SessionError::UnknownSession(chan1)));
    }

    #[tokio::test]
    async fn unbind_is_fire_and_forget_and_loses_nothing() {
        let (handle, _, chan1) = spawn_with_channel().await;
        handle.switch_to(chan1).await.unwrap().unwrap();
        handle
            .append_to_session(chan1, TextUnit::new("kept"))
            .await
            .unwrap();
        handle.unbind().await.unwrap();

        let state = handle.state().await.unwrap();
        assert_eq!(state.active_session, None);
        let snapshot = handle.snapshot(chan1).await.unwrap().unwrap();
        assert_eq!(snapshot.units[0].text, "kept");
    }
}
