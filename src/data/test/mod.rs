mod aura_account;
