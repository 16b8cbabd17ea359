use crate::host::Display;
use crate::message::Message;
use crate::profile::{Evaluation, Profile};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What gets printed after a profile evaluated a message.
#[derive(Debug, Serialize)]
pub struct Report {
    pub id: usize,
    pub profile: &'static str,
    pub display: Display,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    fn new(profile: &Profile, actions: Vec<String>, error: Option<String>) -> Self {
        Report {
            id: profile.id(),
            profile: profile.name(),
            display: profile.value().clone(),
            actions,
            error,
        }
    }
}

/// Runs every profile on the message. Profiles whose filter rejects the
/// message produce no report.
pub fn evaluate_all(profiles: &mut [Profile], message: &Message) -> Vec<Report> {
    let mut reports = Vec::with_capacity(profiles.len());
    for profile in profiles.iter_mut() {
        match profile.eval(message) {
            Evaluation::Skipped => {}
            Evaluation::Evaluated { actions } => reports.push(Report::new(profile, actions, None)),
            Evaluation::Failed(e) => {
                reports.push(Report::new(profile, Vec::new(), Some(e.to_string())))
            }
        }
    }
    reports
}

/// Reads one JSON message per line and forwards it. Resolves to the number of
/// messages sent once the input ends, reading fails or the receiver goes away.
pub fn spawn_reader<R>(mut reader: R, tx: mpsc::Sender<Message>) -> JoinHandle<usize>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        let mut sent = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    log::error!("Error reading input: {}", e);
                    break;
                }
            }
            if buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match Message::parse(&buf) {
                Ok(message) => {
                    if tx.send(message).await.is_err() {
                        log::debug!("Receiver closed, stopping reader");
                        break;
                    }
                    sent += 1;
                }
                Err(e) => log::warn!("Error parsing message: {}", e),
            }
        }

        sent
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::NameFilter;
    use crate::script::{RunningAverageScript, SumScript, COOL_DOWN_ACTION};

    #[tokio::test]
    async fn forwards_valid_lines_only() {
        let input: &'static [u8] = b"{\"value\":50}\n\nnot json\n{\"name\":\"cpu_temp\",\"value\":70}\n";
        let (tx, mut rx) = mpsc::channel(100);

        let sent = spawn_reader(input, tx).await.unwrap();
        assert_eq!(sent, 2);

        assert_eq!(rx.recv().await.unwrap().value, Some(50.0));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.name, "cpu_temp");
        assert_eq!(second.value, Some(70.0));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_end_the_stream() {
        let input: &'static [u8] = b"{\"value\":1}\n{\"name\":\"\xff\",\"value\":2}\n{\"value\":3}";
        let (tx, mut rx) = mpsc::channel(100);

        assert_eq!(spawn_reader(input, tx).await.unwrap(), 2);
        assert_eq!(rx.recv().await.unwrap().value, Some(1.0));
        assert_eq!(rx.recv().await.unwrap().value, Some(3.0));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn stops_when_receiver_is_gone() {
        let input: &'static [u8] = b"{\"value\":1}\n{\"value\":2}\n";
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        assert_eq!(spawn_reader(input, tx).await.unwrap(), 0);
    }

    #[test]
    fn every_matching_profile_reports() {
        let mut profiles = vec![
            Profile::new(1, Box::new(RunningAverageScript), NameFilter::new(vec!["cpu_temp".to_string()])),
            Profile::new(2, Box::new(SumScript), NameFilter::new(vec!["gpu_temp".to_string()])),
            Profile::new(3, Box::new(SumScript), NameFilter::default()),
        ];

        let reports = evaluate_all(&mut profiles, &Message::new("cpu_temp", 70.0));
        let ids: Vec<usize> = reports.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(reports[0].actions, vec![COOL_DOWN_ACTION.to_string()]);
        assert_eq!(reports[1].display.title.as_deref(), Some("the sum is 70"));

        let reports = evaluate_all(&mut profiles, &Message::new("gpu_temp", 5.0));
        let ids: Vec<usize> = reports.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(reports[0].display.title.as_deref(), Some("the sum is 5"));
        assert_eq!(reports[1].display.title.as_deref(), Some("the sum is 75"));
        assert_eq!(profiles[0].store().get("count", 0.0), 1.0);
    }

    #[test]
    fn failed_evaluation_reports_the_error() {
        let mut profiles = vec![Profile::new(1, Box::new(RunningAverageScript), NameFilter::default())];
        let reports = evaluate_all(&mut profiles, &Message::default());

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].error.as_deref(), Some("Message error: Message has no value"));
        assert!(reports[0].actions.is_empty());
    }

    #[test]
    fn report_omits_empty_fields() {
        let mut display = Display::default();
        display.title("t");
        let report = Report {
            id: 1,
            profile: "sum",
            display,
            actions: Vec::new(),
            error: None,
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"id":1,"profile":"sum","display":{"title":"t"}}"#
        );
    }
}
