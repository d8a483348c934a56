//! Contract test macro for invoice stores.
//!
//! # Generated Tests
//!
//! - `test_insert_then_get` - every written column reads back unchanged
//! - `test_insert_assigns_distinct_ids` - ids are never reused
//! - `test_opaque_customer_id` - any non-empty customer reference is kept as-is
//! - `test_malformed_id_is_invalid_identifier`
//! - `test_update_changes_fields_keeps_date` - update touches customer, amount, status only
//! - `test_update_unknown_id_is_noop` - zero rows affected, no error
//! - `test_delete_then_get` - one row removed, then nothing
//! - `test_delete_unknown_id_is_noop`
//! - `test_list_newest_first`
#[macro_export]
macro_rules! invoice_store_tests {
    ($store_factory:expr) => {
        mod invoice_store_tests {
            use super::*;
            use invoice_forms::prelude::*;

            #[tokio::test]
            async fn test_insert_then_get() {
                let store = $store_factory;
                let customer = customer_id();

                let id = store
                    .insert(new_invoice(&customer, 1250, date(2024, 5, 1)))
                    .await
                    .unwrap();

                let invoice = store.get(&id.to_string()).await.unwrap().unwrap();
                assert_eq!(invoice.id, id);
                assert_eq!(invoice.customer_id, customer);
                assert_eq!(invoice.amount, Cents(1250));
                assert_eq!(invoice.status, InvoiceStatus::Pending);
                assert_eq!(invoice.date, date(2024, 5, 1));
            }

            #[tokio::test]
            async fn test_insert_assigns_distinct_ids() {
                let store = $store_factory;
                let customer = customer_id();

                let a = store
                    .insert(new_invoice(&customer, 100, date(2024, 5, 1)))
                    .await
                    .unwrap();
                let b = store
                    .insert(new_invoice(&customer, 100, date(2024, 5, 1)))
                    .await
                    .unwrap();

                assert_ne!(a, b);
                assert_eq!(store.list().await.unwrap().len(), 2);
            }

            #[tokio::test]
            async fn test_opaque_customer_id() {
                let store = $store_factory;

                let id = store
                    .insert(new_invoice("c1", 1250, date(2024, 5, 1)))
                    .await
                    .unwrap();
                store
                    .update(
                        &id.to_string(),
                        InvoiceChanges {
                            customer_id: "customer #2".to_string(),
                            amount: Cents(1250),
                            status: InvoiceStatus::Paid,
                        },
                    )
                    .await
                    .unwrap();

                let invoice = store.get(&id.to_string()).await.unwrap().unwrap();
                assert_eq!(invoice.customer_id, "customer #2");
            }

            #[tokio::test]
            async fn test_malformed_id_is_invalid_identifier() {
                let store = $store_factory;
                let changes = InvoiceChanges {
                    customer_id: "c1".to_string(),
                    amount: Cents(1),
                    status: InvoiceStatus::Paid,
                };

                assert!(matches!(
                    store.get("not-a-uuid").await,
                    Err(StorageError::InvalidIdentifier { .. })
                ));
                assert!(matches!(
                    store.update("not-a-uuid", changes).await,
                    Err(StorageError::InvalidIdentifier { .. })
                ));
                assert!(matches!(
                    store.delete("not-a-uuid").await,
                    Err(StorageError::InvalidIdentifier { .. })
                ));
            }

            #[tokio::test]
            async fn test_update_changes_fields_keeps_date() {
                let store = $store_factory;
                let id = store
                    .insert(new_invoice(&customer_id(), 1250, date(2024, 5, 1)))
                    .await
                    .unwrap();
                let other_customer = customer_id();

                let rows = store
                    .update(
                        &id.to_string(),
                        InvoiceChanges {
                            customer_id: other_customer.clone(),
                            amount: Cents(9999),
                            status: InvoiceStatus::Paid,
                        },
                    )
                    .await
                    .unwrap();
                assert_eq!(rows, 1);

                let invoice = store.get(&id.to_string()).await.unwrap().unwrap();
                assert_eq!(invoice.customer_id, other_customer);
                assert_eq!(invoice.amount, Cents(9999));
                assert_eq!(invoice.status, InvoiceStatus::Paid);
                assert_eq!(invoice.date, date(2024, 5, 1));
            }

            #[tokio::test]
            async fn test_update_unknown_id_is_noop() {
                let store = $store_factory;
                let id = store
                    .insert(new_invoice(&customer_id(), 1250, date(2024, 5, 1)))
                    .await
                    .unwrap();

                let rows = store
                    .update(
                        &Uuid::new_v4().to_string(),
                        InvoiceChanges {
                            customer_id: customer_id(),
                            amount: Cents(1),
                            status: InvoiceStatus::Paid,
                        },
                    )
                    .await
                    .unwrap();
                assert_eq!(rows, 0);

                let untouched = store.get(&id.to_string()).await.unwrap().unwrap();
                assert_eq!(untouched.amount, Cents(1250));
            }

            #[tokio::test]
            async fn test_delete_then_get() {
                let store = $store_factory;
                let id = store
                    .insert(new_invoice(&customer_id(), 1250, date(2024, 5, 1)))
                    .await
                    .unwrap();

                assert_eq!(store.delete(&id.to_string()).await.unwrap(), 1);
                assert!(store.get(&id.to_string()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_unknown_id_is_noop() {
                let store = $store_factory;
                assert_eq!(store.delete(&Uuid::new_v4().to_string()).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $store_factory;
                let customer = customer_id();
                store
                    .insert(new_invoice(&customer, 1, date(2023, 1, 1)))
                    .await
                    .unwrap();
                store
                    .insert(new_invoice(&customer, 2, date(2024, 1, 1)))
                    .await
                    .unwrap();

                let list = store.list().await.unwrap();
                assert_eq!(list.len(), 2);
                assert_eq!(list[0].date, date(2024, 1, 1));
                assert_eq!(list[1].date, date(2023, 1, 1));
            }
        }
    };
}
