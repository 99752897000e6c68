mod firestore;
mod identity_toolkit;
