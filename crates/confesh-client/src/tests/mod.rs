mod firebase;
