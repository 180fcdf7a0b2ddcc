use arrow_schema::DataType;
use fdq_common::{FdqError, MetricsRegistry};
use fdq_connector::{
    ColumnMetadata, Fragment, MemoryConnector, MemoryConnectorConfig, MetadataProvider,
    SchemaTableName, TableMetadata,
};
use std::sync::Arc;
use std::thread;

fn connector() -> MemoryConnector {
    MemoryConnector::with_metrics(MemoryConnectorConfig::default(), MetricsRegistry::new())
}

fn events() -> TableMetadata {
    TableMetadata::new(
        SchemaTableName::new("logs", "events"),
        vec![
            ColumnMetadata::new("ts", DataType::Int64),
            ColumnMetadata::new("payload", DataType::Utf8),
        ],
    )
}

#[test]
fn staged_table_is_invisible_until_commit() {
    let connector = connector();
    let staged = connector.begin_create_table(&events()).expect("begin");

    assert!(connector
        .table_handle(&SchemaTableName::new("logs", "events"))
        .is_none());
    assert!(connector.list_tables(None).is_empty());
    assert!(connector.list_schema_names().is_empty());
    assert_eq!(connector.pending_create_count(), 1);

    connector
        .commit_create_table(
            staged.as_ref(),
            vec![Fragment("w0".to_string()), Fragment("w1".to_string())],
        )
        .expect("commit");

    assert_eq!(connector.pending_create_count(), 0);
    let handle = connector
        .table_handle(&SchemaTableName::new("logs", "events"))
        .expect("visible after commit");
    let metadata = connector.table_metadata(handle.as_ref()).expect("metadata");
    assert_eq!(metadata, events());
    assert_eq!(connector.list_schema_names(), vec!["logs".to_string()]);
}

#[test]
fn commit_with_no_fragments_still_publishes() {
    let connector = connector();
    let minimal = TableMetadata::new(
        SchemaTableName::new("s", "t"),
        vec![ColumnMetadata::new("a", DataType::Int64)],
    );
    let staged = connector.begin_create_table(&minimal).expect("begin");
    connector
        .commit_create_table(staged.as_ref(), Vec::new())
        .expect("commit");

    assert_eq!(
        connector.list_tables(Some("s")),
        vec![SchemaTableName::new("s", "t")]
    );
    let handle = connector
        .table_handle(&SchemaTableName::new("s", "t"))
        .expect("visible after commit");
    let metadata = connector.table_metadata(handle.as_ref()).expect("metadata");
    assert_eq!(metadata.columns().len(), 1);
    assert_eq!(metadata.columns()[0].name(), "a");
    assert_eq!(metadata.columns()[0].data_type(), &DataType::Int64);
}

#[test]
fn double_commit_fails_and_leaves_table_intact() {
    let connector = connector();
    let staged = connector.begin_create_table(&events()).expect("begin");
    connector
        .commit_create_table(staged.as_ref(), vec![Fragment("w0".to_string())])
        .expect("first commit");

    assert!(matches!(
        connector.commit_create_table(staged.as_ref(), Vec::new()),
        Err(FdqError::AbandonedTransaction(_))
    ));

    let handle = connector
        .table_handle(&SchemaTableName::new("logs", "events"))
        .expect("table survives failed recommit");
    assert_eq!(
        connector.table_metadata(handle.as_ref()).expect("metadata"),
        events()
    );
}

#[test]
fn commit_after_abort_fails() {
    let connector = connector();
    let staged = connector.begin_create_table(&events()).expect("begin");
    connector.abort_create_table(staged.as_ref()).expect("abort");

    assert!(matches!(
        connector.commit_create_table(staged.as_ref(), Vec::new()),
        Err(FdqError::AbandonedTransaction(_))
    ));
    assert!(connector
        .table_handle(&SchemaTableName::new("logs", "events"))
        .is_none());
    assert_eq!(connector.pending_create_count(), 0);
}

#[test]
fn abort_after_commit_fails() {
    let connector = connector();
    let staged = connector.begin_create_table(&events()).expect("begin");
    connector
        .commit_create_table(staged.as_ref(), Vec::new())
        .expect("commit");
    assert!(matches!(
        connector.abort_create_table(staged.as_ref()),
        Err(FdqError::AbandonedTransaction(_))
    ));
}

#[test]
fn begin_rejects_name_taken_by_committed_table() {
    let connector = connector();
    connector.create_table(&events()).expect("create");
    assert!(matches!(
        connector.begin_create_table(&events()),
        Err(FdqError::AlreadyExists(_))
    ));
}

#[test]
fn name_race_is_decided_at_commit_time() {
    let connector = connector();
    let first = connector.begin_create_table(&events()).expect("first begin");
    let second = connector
        .begin_create_table(&events())
        .expect("second begin of same name");
    assert_eq!(connector.pending_create_count(), 2);

    connector
        .commit_create_table(first.as_ref(), vec![Fragment("winner".to_string())])
        .expect("first commit wins");
    assert!(matches!(
        connector.commit_create_table(second.as_ref(), Vec::new()),
        Err(FdqError::AlreadyExists(_))
    ));

    // The loser stays pending and may retry once the name frees up.
    assert_eq!(connector.pending_create_count(), 1);
    let winner = connector
        .table_handle(&SchemaTableName::new("logs", "events"))
        .expect("winner visible");
    connector.drop_table(winner.as_ref()).expect("drop winner");
    connector
        .commit_create_table(second.as_ref(), Vec::new())
        .expect("retry after drop");
    assert_eq!(connector.pending_create_count(), 0);
}

#[test]
fn pending_cap_counts_only_live_transactions() {
    let connector = MemoryConnector::with_metrics(
        MemoryConnectorConfig {
            max_pending_creates: 2,
            ..MemoryConnectorConfig::default()
        },
        MetricsRegistry::new(),
    );

    let first = connector.begin_create_table(&events()).expect("first");
    let other = TableMetadata::new(
        SchemaTableName::new("logs", "errors"),
        vec![ColumnMetadata::new("ts", DataType::Int64)],
    );
    let second = connector.begin_create_table(&other).expect("second");
    assert_eq!(connector.pending_create_count(), 2);

    let third = TableMetadata::new(
        SchemaTableName::new("logs", "audit"),
        vec![ColumnMetadata::new("ts", DataType::Int64)],
    );
    assert!(matches!(
        connector.begin_create_table(&third),
        Err(FdqError::Connector(_))
    ));

    connector
        .commit_create_table(first.as_ref(), Vec::new())
        .expect("commit frees a slot");
    connector.abort_create_table(second.as_ref()).expect("abort frees a slot");
    assert_eq!(connector.pending_create_count(), 0);
    connector.begin_create_table(&third).expect("cap released");
}

#[test]
fn sampled_staging_respects_capability() {
    let weighted = TableMetadata::new(
        SchemaTableName::new("logs", "weighted"),
        vec![
            ColumnMetadata::new("ts", DataType::Int64),
            ColumnMetadata::new("weight", DataType::Int64).sample_weight(true),
        ],
    );

    let unsampled = MemoryConnector::with_metrics(
        MemoryConnectorConfig {
            supports_sampled_tables: false,
            ..MemoryConnectorConfig::default()
        },
        MetricsRegistry::new(),
    );
    assert!(!unsampled.can_create_sampled_tables());
    assert!(matches!(
        unsampled.begin_create_table(&weighted),
        Err(FdqError::UnsupportedSchema(_))
    ));

    let sampled = connector();
    assert!(sampled.can_create_sampled_tables());
    let staged = sampled.begin_create_table(&weighted).expect("begin");
    sampled
        .commit_create_table(staged.as_ref(), Vec::new())
        .expect("commit");
    let handle = sampled
        .table_handle(&SchemaTableName::new("logs", "weighted"))
        .expect("handle");
    assert!(sampled
        .sample_weight_column_handle(handle.as_ref())
        .expect("lookup")
        .is_some());
}

#[test]
fn direct_create_is_visible_immediately() {
    let connector = connector();
    let handle = connector.create_table(&events()).expect("create");
    assert_eq!(connector.pending_create_count(), 0);
    assert_eq!(
        connector.table_metadata(handle.as_ref()).expect("metadata"),
        events()
    );
    assert!(connector
        .table_handle(&SchemaTableName::new("logs", "events"))
        .is_some());
}

#[test]
fn pending_gauge_is_rendered() {
    let metrics = MetricsRegistry::new();
    let connector =
        MemoryConnector::with_metrics(MemoryConnectorConfig::default(), metrics.clone());
    let staged = connector.begin_create_table(&events()).expect("begin");

    let rendered = metrics.render_prometheus();
    assert!(rendered.contains("fdq_create_pending_transactions"));

    connector.abort_create_table(staged.as_ref()).expect("abort");
    assert_eq!(connector.pending_create_count(), 0);
}

#[test]
fn readers_never_observe_partially_created_tables() {
    let connector = Arc::new(connector());
    let total = 20usize;

    let writer = {
        let connector = Arc::clone(&connector);
        thread::spawn(move || {
            for i in 0..total {
                let metadata = TableMetadata::new(
                    SchemaTableName::new("bulk", format!("t{i}")),
                    vec![
                        ColumnMetadata::new("a", DataType::Int64),
                        ColumnMetadata::new("b", DataType::Utf8),
                        ColumnMetadata::new("c", DataType::Float64),
                    ],
                );
                let staged = connector.begin_create_table(&metadata).expect("begin");
                connector
                    .commit_create_table(staged.as_ref(), vec![Fragment(format!("frag-{i}"))])
                    .expect("commit");
            }
        })
    };

    let reader = {
        let connector = Arc::clone(&connector);
        thread::spawn(move || {
            let mut complete = 0usize;
            for _ in 0..1_000_000 {
                complete = 0;
                for name in connector.list_tables(Some("bulk")) {
                    let handle = match connector.table_handle(&name) {
                        Some(handle) => handle,
                        None => continue,
                    };
                    let metadata = connector.table_metadata(handle.as_ref()).expect("metadata");
                    assert_eq!(metadata.columns().len(), 3, "partial table {name}");
                    complete += 1;
                }
                if complete == total {
                    break;
                }
            }
            complete
        })
    };

    writer.join().expect("writer thread");
    let complete = reader.join().expect("reader thread");
    assert_eq!(complete, total);
}
