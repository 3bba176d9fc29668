use async_trait::async_trait;
use exam_shop_actor::{ActorEntity, FrameworkError, ResourceActor};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: String,
    state: &'static str,
    note: String,
}

#[derive(Debug)]
enum TicketAction {
    Close(String),
    /// Writes the note, then fails: the actor must discard the write.
    CloseThenFail(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum TicketError {
    #[error("ticket {0} is already closed")]
    AlreadyClosed(String),
    #[error("remote rejected the change")]
    Rejected,
}

/// Counts how often the remote side was called.
type RemoteCalls = Arc<AtomicU32>;

#[async_trait]
impl ActorEntity for Ticket {
    type Id = String;
    type Action = TicketAction;
    type ActionResult = Ticket;
    type Context = RemoteCalls;
    type Error = TicketError;

    fn id(&self) -> String {
        self.id.clone()
    }

    async fn handle_action(
        &mut self,
        action: TicketAction,
        calls: &RemoteCalls,
    ) -> Result<Ticket, TicketError> {
        calls.fetch_add(1, Ordering::SeqCst);
        if self.state == "closed" {
            return Err(TicketError::AlreadyClosed(self.id.clone()));
        }
        match action {
            TicketAction::Close(note) => {
                self.state = "closed";
                self.note = note;
                Ok(self.clone())
            }
            TicketAction::CloseThenFail(note) => {
                self.state = "closed";
                self.note = note;
                Err(TicketError::Rejected)
            }
        }
    }
}

fn ticket(id: &str) -> Ticket {
    Ticket {
        id: id.to_string(),
        state: "open",
        note: String::new(),
    }
}

#[tokio::test]
async fn test_load_keeps_order_and_replaces_snapshot() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    let handle = tokio::spawn(actor.run(Arc::new(AtomicU32::new(0))));

    let size = client
        .load(vec![ticket("t3"), ticket("t1"), ticket("t2")])
        .await
        .unwrap();
    assert_eq!(size, 3);

    let ids: Vec<String> = client.list().await.unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["t3", "t1", "t2"]);

    // A second load is a full replacement, not a merge.
    client.load(vec![ticket("t9")]).await.unwrap();
    let ids: Vec<String> = client.list().await.unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["t9"]);
    assert!(client.get("t1".to_string()).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_put_replaces_in_place_and_appends_new() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(Arc::new(AtomicU32::new(0))));

    client.load(vec![ticket("a"), ticket("b")]).await.unwrap();

    let mut changed = ticket("a");
    changed.note = "refetched".into();
    client.put(changed).await.unwrap();
    client.put(ticket("c")).await.unwrap();

    let all = client.list().await.unwrap();
    let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(all[0].note, "refetched");
}

#[tokio::test]
async fn test_action_commits_on_success() {
    let calls = Arc::new(AtomicU32::new(0));
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(calls.clone()));

    client.load(vec![ticket("t1")]).await.unwrap();

    let closed = client
        .perform_action("t1".into(), TicketAction::Close("done".into()))
        .await
        .unwrap();
    assert_eq!(closed.state, "closed");

    let stored = client.get("t1".into()).await.unwrap().unwrap();
    assert_eq!(stored, closed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Closing twice surfaces the entity's own error type.
    let err = client
        .perform_action("t1".into(), TicketAction::Close("again".into()))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<TicketError>().unwrap(),
        TicketError::AlreadyClosed("t1".into())
    );
}

#[tokio::test]
async fn test_failed_action_leaves_snapshot_untouched() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(Arc::new(AtomicU32::new(0))));

    client.load(vec![ticket("t1")]).await.unwrap();

    let result = client
        .perform_action("t1".into(), TicketAction::CloseThenFail("partial".into()))
        .await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));

    let stored = client.get("t1".into()).await.unwrap().unwrap();
    assert_eq!(stored, ticket("t1"));
}

#[tokio::test]
async fn test_action_on_unknown_id_is_not_found() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(Arc::new(AtomicU32::new(0))));

    let err = client
        .perform_action("ghost".into(), TicketAction::Close(String::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "ghost"));
}

#[tokio::test]
async fn test_concurrent_actions_are_serialized() {
    let calls = Arc::new(AtomicU32::new(0));
    let (actor, client) = ResourceActor::<Ticket>::new(32);
    tokio::spawn(actor.run(calls.clone()));

    client.load(vec![ticket("t1")]).await.unwrap();

    let mut handles = vec![];
    for i in 0..10 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .perform_action("t1".into(), TicketAction::Close(format!("closer {i}")))
                .await
        }));
    }

    let mut successful = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successful += 1;
        }
    }

    // Exactly one close wins; the rest see an already-closed ticket.
    assert_eq!(successful, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}
